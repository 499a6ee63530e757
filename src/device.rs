/// Opaque identity token for one capture device.
///
/// Produced by a capture backend; everything else treats it as an
/// equality-comparable handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CameraId(String);

impl CameraId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CameraId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One discovered capture device: identity plus a human-readable label.
///
/// Devices compare equal by id; labels are display-only.
#[derive(Debug, Clone, Eq)]
pub struct CameraDevice {
    id: CameraId,
    label: String,
}

impl CameraDevice {
    pub fn new(id: CameraId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    pub fn id(&self) -> &CameraId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for CameraDevice {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devices_compare_by_id_not_label() {
        let a = CameraDevice::new(CameraId::new("video0"), "Front camera");
        let b = CameraDevice::new(CameraId::new("video0"), "Renamed");
        let c = CameraDevice::new(CameraId::new("video1"), "Front camera");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
