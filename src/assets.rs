//! Steam CDN artwork and launch URLs derived from an app id.

use serde::Serialize;

const STEAM_CDN: &str = "https://cdn.steamstatic.com/steam/apps";
const CLOUDFLARE_CDN: &str = "https://cdn.cloudflare.steamstatic.com/steam/apps";

/// `steam://run/<appid>`
pub fn launch_url(app_id: &str) -> String {
    format!("steam://run/{}", app_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetUrls {
    pub logo: String,
    pub banner: String,
    pub big_banner: String,
    pub vertical_banner: String,
    pub horizontal_banner: String,
    pub info_banner: String,
}

impl AssetUrls {
    pub fn for_app(app_id: &str) -> Self {
        Self {
            logo: format!("{}/{}/logo.png", STEAM_CDN, app_id),
            banner: format!("{}/{}/header.jpg", CLOUDFLARE_CDN, app_id),
            big_banner: format!("{}/{}/library_hero.jpg", CLOUDFLARE_CDN, app_id),
            vertical_banner: format!("{}/{}/library_600x900.jpg", STEAM_CDN, app_id),
            horizontal_banner: format!("{}/{}/capsule_231x87.jpg", STEAM_CDN, app_id),
            info_banner: format!("{}/{}/page_bg_generated_v6b.jpg", CLOUDFLARE_CDN, app_id),
        }
    }
}
