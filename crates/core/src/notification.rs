//! Donor-facing push message templates.
//!
//! The wording is fixed product copy; only the deep-link payload varies.

use serde::Serialize;
use serde_json::json;

use crate::types::DbId;

/// URL scheme registered by the donor mobile app.
pub const DEEP_LINK_SCHEME: &str = "kurbancebimde";

pub const PACKAGE_PUBLISHED_TITLE: &str = "Kesim Görselleriniz Hazır";
pub const PACKAGE_PUBLISHED_BODY: &str =
    "Kurban kesim medya paketiniz yayına alındı. İncelemek için dokunun.";

pub const STREAM_STARTED_TITLE: &str = "📺 Canlı Yayın";

/// A provider-agnostic push message, addressed separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    /// Deep-link payload delivered to the app alongside the alert.
    pub data: serde_json::Value,
    pub sound: &'static str,
    pub badge: Option<u32>,
}

/// Deep link that opens a media package in the donor app.
pub fn package_deep_link(package_id: DbId) -> String {
    format!("{DEEP_LINK_SCHEME}://media-package/{package_id}")
}

/// "Your media package is ready" message.
pub fn package_published_message(package_id: DbId) -> PushMessage {
    PushMessage {
        title: PACKAGE_PUBLISHED_TITLE.to_string(),
        body: PACKAGE_PUBLISHED_BODY.to_string(),
        data: json!({
            "type": "media_package",
            "packageId": package_id.to_string(),
            "url": package_deep_link(package_id),
        }),
        sound: "default",
        badge: Some(1),
    }
}

/// "Stream started" message for the stream owner.
pub fn stream_started_message(stream_id: DbId, stream_title: &str) -> PushMessage {
    PushMessage {
        title: STREAM_STARTED_TITLE.to_string(),
        body: format!("{stream_title}: Yayın başladı"),
        data: json!({
            "type": "stream",
            "streamId": stream_id.to_string(),
            "title": stream_title,
        }),
        sound: "default",
        badge: Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_message_carries_deep_link() {
        let id = uuid::Uuid::new_v4();
        let msg = package_published_message(id);
        assert_eq!(msg.title, PACKAGE_PUBLISHED_TITLE);
        assert_eq!(msg.data["type"], "media_package");
        assert_eq!(msg.data["packageId"], id.to_string());
        assert_eq!(
            msg.data["url"],
            format!("kurbancebimde://media-package/{id}")
        );
    }

    #[test]
    fn stream_message_includes_title() {
        let id = uuid::Uuid::new_v4();
        let msg = stream_started_message(id, "Sabah Kesimi");
        assert_eq!(msg.body, "Sabah Kesimi: Yayın başladı");
        assert_eq!(msg.data["streamId"], id.to_string());
        assert_eq!(msg.data["type"], "stream");
    }
}
