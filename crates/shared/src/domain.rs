use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(ScopeId);
id_newtype!(DataViewId);

impl ScopeId {
    pub const DEFAULT: &'static str = "default";
    pub const DETECTIONS: &'static str = "detections";
    pub const TIMELINE: &'static str = "timeline";

    pub fn default_scope() -> Self {
        Self::new(Self::DEFAULT)
    }

    pub fn detections() -> Self {
        Self::new(Self::DETECTIONS)
    }

    pub fn timeline() -> Self {
        Self::new(Self::TIMELINE)
    }

    /// Scopes every freshly initialised store carries.
    pub fn well_known() -> [ScopeId; 3] {
        [Self::default_scope(), Self::detections(), Self::timeline()]
    }

    pub fn kind(&self) -> ScopeKind {
        match self.0.as_str() {
            Self::DEFAULT => ScopeKind::Default,
            Self::DETECTIONS => ScopeKind::Detections,
            Self::TIMELINE => ScopeKind::Timeline,
            _ => ScopeKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Default,
    Detections,
    Timeline,
    Other,
}
