use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use super::{LanguageCode, Timezone, Url};

pub type AgencyId = Id<Agency>;

/// The operator named in `agency.txt`.
/// See <https://gtfs.org/schedule/reference/#agencytxt>
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agency {
    #[serde(rename = "agency_id")]
    pub id: Option<AgencyId>,

    #[serde(rename = "agency_name")]
    pub name: String,

    #[serde(rename = "agency_url")]
    pub url: Url,

    #[serde(rename = "agency_timezone")]
    pub timezone: Timezone,

    #[serde(rename = "agency_lang")]
    pub language_code: Option<LanguageCode>,
}

impl Agency {
    /// The placeholder agency every drawn route is attributed to.
    pub fn demo() -> Self {
        Self {
            id: Some(Id::new("DEMO_AGENCY".to_owned())),
            name: "Demo Transit Agency".to_owned(),
            url: "http://example.com".to_owned(),
            timezone: "America/New_York".to_owned(),
            language_code: None,
        }
    }
}

impl HasId for Agency {
    type IdType = String;
}
