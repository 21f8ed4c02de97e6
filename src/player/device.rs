//! Mobile vs desktop classification.
//!
//! The class only changes how the `behind` strategy opens windows, never which
//! strategy runs. Classification sits behind [`DeviceClassifier`] so tests and
//! tools can force either branch.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Known mobile OS identifiers in user agents.
static MOBILE_UA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini").unwrap()
});

/// Widest viewport still treated as a phone/tablet when touch is available.
pub const MOBILE_VIEWPORT_MAX: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

/// What the page reports about the visitor's device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceProfile {
    pub user_agent: Option<String>,
    pub viewport_width: Option<u32>,
    pub touch: bool,
}

impl DeviceProfile {
    pub fn from_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: Some(user_agent.into()),
            ..Self::default()
        }
    }
}

pub trait DeviceClassifier: Send + Sync {
    fn classify(&self, profile: &DeviceProfile) -> DeviceClass;
}

/// User-agent match, or a narrow touch viewport.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicClassifier;

impl DeviceClassifier for HeuristicClassifier {
    fn classify(&self, profile: &DeviceProfile) -> DeviceClass {
        let ua_mobile = profile
            .user_agent
            .as_deref()
            .is_some_and(|ua| MOBILE_UA_REGEX.is_match(ua));
        let narrow_touch = profile.touch
            && profile
                .viewport_width
                .is_some_and(|width| width <= MOBILE_VIEWPORT_MAX);

        if ua_mobile || narrow_touch {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Always answers the same class.
#[derive(Debug, Clone, Copy)]
pub struct FixedClassifier(pub DeviceClass);

impl DeviceClassifier for FixedClassifier {
    fn classify(&self, _profile: &DeviceProfile) -> DeviceClass {
        self.0
    }
}
