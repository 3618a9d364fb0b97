use crate::constants::{LOW_POWER, MOBILE, TABLET, TOUCH};
use bitflags::bitflags;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;
use std::sync::Arc;

bitflags! {
    /// Coarse facts about the host device.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct DeviceTraits: u32 {
        const MOBILE = 1 << 0;
        const TABLET = 1 << 1;
        const TOUCH = 1 << 2;
        const LOW_POWER = 1 << 3;

        /// Devices that get conservative defaults.
        const CONSTRAINED = Self::MOBILE.bits() | Self::TABLET.bits();
    }
}

impl DeviceTraits {
    /// Looks up a single trait by its configuration name.
    #[must_use]
    pub fn from_config_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            MOBILE => Some(Self::MOBILE),
            TABLET => Some(Self::TABLET),
            TOUCH => Some(Self::TOUCH),
            LOW_POWER => Some(Self::LOW_POWER),
            _ => None,
        }
    }

    /// Configuration names of the set traits, in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        [
            (Self::MOBILE, MOBILE),
            (Self::TABLET, TABLET),
            (Self::TOUCH, TOUCH),
            (Self::LOW_POWER, LOW_POWER),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }
}

impl Serialize for DeviceTraits {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.names().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DeviceTraits {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        names.iter().try_fold(Self::empty(), |acc, name| {
            Self::from_config_name(name)
                .map(|t| acc | t)
                .ok_or_else(|| D::Error::custom(format!("unknown device trait '{name}'")))
        })
    }
}

/// Read-only view of the host device.
///
/// Implementations must be pure: the same provider answers the same way for its whole lifetime.
pub trait DeviceFacts: Debug + Send + Sync {
    fn traits(&self) -> DeviceTraits;

    /// Mobile phones and tablets.
    fn is_constrained(&self) -> bool {
        self.traits().intersects(DeviceTraits::CONSTRAINED)
    }
}

impl<T: DeviceFacts + ?Sized> DeviceFacts for Arc<T> {
    fn traits(&self) -> DeviceTraits {
        (**self).traits()
    }

    fn is_constrained(&self) -> bool {
        (**self).is_constrained()
    }
}

impl DeviceFacts for DeviceTraits {
    fn traits(&self) -> DeviceTraits {
        *self
    }
}
