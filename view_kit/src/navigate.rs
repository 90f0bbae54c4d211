//! Navigation targets for the secret-scan views
//!
//! Maps asset types and clicked rows to the scans-view paths the dashboard
//! routes on. Container images keep their legacy `container_image` spelling
//! in query strings.

use crate::api::models::AssetType;

/// Card title for a top-assets view
pub fn card_title(asset_type: AssetType) -> &'static str {
    match asset_type {
        AssetType::Host => "Top hosts exposing secrets",
        AssetType::Container => "Top containers exposing secrets",
        AssetType::Image => "Top container images exposing secrets",
    }
}

/// Landing path for a whole top-assets card
pub fn scans_index_path(asset_type: AssetType) -> &'static str {
    match asset_type {
        AssetType::Host => "/secret/scans?nodeType=host",
        AssetType::Container => "/secret/scans?nodeType=container",
        AssetType::Image => "/secret/scans?nodeType=container_image",
    }
}

/// Resolve a clicked row to its filtered scans-view link
///
/// # Arguments
/// * `asset_type` - Which card the click landed on
/// * `id` - The clicked row's node id, if it carried one
///
/// # Returns
/// The scans path filtered to that node, or `None` when the row has no id.
/// An id-less click logs a warning and navigates nowhere.
pub fn scans_link(asset_type: AssetType, id: Option<&str>) -> Option<String> {
    let Some(id) = id else {
        log::warn!("Missing node id to navigate to scan page");
        return None;
    };

    let encoded = urlencoding::encode(id);
    let link = match asset_type {
        AssetType::Host => format!("/secret/scans?nodeType=host&hosts={}", encoded),
        AssetType::Container => format!("/secret/scans?nodeType=container&containers={}", encoded),
        AssetType::Image => format!(
            "/secret/scans?nodeType=container_image&containerImages={}",
            encoded
        ),
    };
    Some(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_titles() {
        assert_eq!(card_title(AssetType::Host), "Top hosts exposing secrets");
        assert_eq!(
            card_title(AssetType::Image),
            "Top container images exposing secrets"
        );
    }

    #[test]
    fn test_index_path_uses_legacy_image_spelling() {
        assert_eq!(
            scans_index_path(AssetType::Image),
            "/secret/scans?nodeType=container_image"
        );
        assert_eq!(
            scans_index_path(AssetType::Host),
            "/secret/scans?nodeType=host"
        );
    }

    #[test]
    fn test_click_link_per_asset_type() {
        assert_eq!(
            scans_link(AssetType::Host, Some("h1")).as_deref(),
            Some("/secret/scans?nodeType=host&hosts=h1")
        );
        assert_eq!(
            scans_link(AssetType::Container, Some("c1")).as_deref(),
            Some("/secret/scans?nodeType=container&containers=c1")
        );
        assert_eq!(
            scans_link(AssetType::Image, Some("img:tag")).as_deref(),
            Some("/secret/scans?nodeType=container_image&containerImages=img%3Atag")
        );
    }

    #[test]
    fn test_missing_id_resolves_to_none() {
        assert_eq!(scans_link(AssetType::Host, None), None);
    }

    #[test]
    fn test_id_is_url_escaped() {
        let link = scans_link(AssetType::Host, Some("ip-10-0-0-1/eu west")).unwrap();
        assert_eq!(
            link,
            "/secret/scans?nodeType=host&hosts=ip-10-0-0-1%2Feu%20west"
        );
    }
}
