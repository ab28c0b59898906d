//! Device metadata fed to the tagging API
//!
//! Collecting the values is the host application's concern; the SDK only
//! reports them as tags under a fixed set of keys.

/// Device metadata reported by [`Coordinator::set_device_tags`].
///
/// [`Coordinator::set_device_tags`]: crate::Coordinator::set_device_tags
#[derive(Debug, Clone)]
pub struct DeviceProfile {
    /// Hardware model name
    pub model: String,
    /// Operating system name and version
    pub os: String,
    /// Preferred language or locale identifier
    pub language: String,
    /// Time zone name
    pub time_zone: String,
    /// Application version
    pub version: String,
    /// Application build identifier
    pub build: String,
}

impl DeviceProfile {
    /// The fixed `(key, value)` pairs reported for this device.
    pub fn tags(&self) -> [(&'static str, &str); 6] {
        [
            ("Device", self.model.as_str()),
            ("OS", self.os.as_str()),
            ("Language", self.language.as_str()),
            ("Time Zone", self.time_zone.as_str()),
            ("Version", self.version.as_str()),
            ("Build", self.build.as_str()),
        ]
    }
}
