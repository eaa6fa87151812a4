//! GOG.com public stats API.
//!
//! `GET https://www.gog.com/u/<username>/games/stats` returns a paginated
//! HAL document; pages link to the next one via `_links.next.href`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::GridError;

const STATS_BASE_URL: &str = "https://www.gog.com";

/// Cover-art info for one owned game, keyed by catalog id.
pub type CoverMap = HashMap<String, Cover>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cover {
    pub title: String,
    /// Protocol-relative image base URL, e.g. `//images.gog.com/abc123`.
    pub image: String,
}

impl Cover {
    pub fn cover_url(&self) -> String {
        format!("https:{}.jpg", self.image)
    }
}

#[derive(Debug, Deserialize)]
struct StatsPage {
    #[serde(rename = "_embedded")]
    embedded: Embedded,
    #[serde(rename = "_links", default)]
    links: Links,
}

#[derive(Debug, Deserialize)]
struct Embedded {
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    game: ApiGame,
}

#[derive(Debug, Deserialize)]
struct ApiGame {
    id: u64,
    title: String,
    image: String,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    next: Option<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
}

/// Fetches the full games list for a GOG user, following pagination.
pub fn fetch_covers(
    client: &reqwest::blocking::Client,
    username: &str,
) -> Result<CoverMap, GridError> {
    let mut url = format!("{STATS_BASE_URL}/u/{username}/games/stats");
    let mut covers = CoverMap::new();

    loop {
        let resp = client.get(&url).send()?;
        let status = resp.status();
        if status.as_u16() == 404 {
            return Err(GridError::UserNotFound(username.to_string()));
        }
        if !status.is_success() {
            return Err(GridError::Status(status.as_u16()));
        }

        let page: StatsPage = serde_json::from_slice(&resp.bytes()?)?;
        collect_page(&mut covers, page.embedded.items);

        match page.links.next {
            Some(next) => url = next.href,
            None => break,
        }
    }

    Ok(covers)
}

fn collect_page(covers: &mut CoverMap, items: Vec<Item>) {
    for item in items {
        covers.insert(
            item.game.id.to_string(),
            Cover {
                title: item.game.title,
                image: item.game.image,
            },
        );
    }
}
