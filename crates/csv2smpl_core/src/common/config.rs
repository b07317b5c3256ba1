use super::{
    betas::Betas,
    mapping::{ChannelMapping, EulerOrders},
    types::Gender,
};

/// Everything that parameterizes a conversion. Built once before the first
/// frame is read and shared read-only by the converter and the builder.
#[derive(Clone, Debug)]
pub struct ConversionConfig {
    pub mapping: ChannelMapping,
    pub euler_orders: EulerOrders,
    pub betas: Betas,
    pub gender: Gender,
    /// Written as `mocap_framerate` when set
    pub frame_rate: Option<f64>,
    /// Fail instead of warn when an angle is larger than 2π
    pub reject_out_of_range_angles: bool,
}
impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            mapping: ChannelMapping::steadyspeed(),
            euler_orders: EulerOrders::default(),
            betas: Betas::default(),
            gender: Gender::Neutral,
            frame_rate: None,
            reject_out_of_range_angles: false,
        }
    }
}
impl ConversionConfig {
    pub fn new(mapping: ChannelMapping, euler_orders: EulerOrders) -> Self {
        Self {
            mapping,
            euler_orders,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_betas(mut self, betas: Betas) -> Self {
        self.betas = betas;
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    #[must_use]
    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = Some(frame_rate);
        self
    }

    #[must_use]
    pub fn strict_radians(mut self, strict: bool) -> Self {
        self.reject_out_of_range_angles = strict;
        self
    }
}
