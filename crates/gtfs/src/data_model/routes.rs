use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use utility::id::{HasId, Id};

use super::{agency::AgencyId, Color};

/// Vehicle type of a route, as the numeric `route_type` code.
/// See <https://gtfs.org/schedule/reference/#routestxt>
#[derive(Serialize_repr, Deserialize_repr, PartialEq, Eq, Debug, Clone, Copy, Default)]
#[repr(u8)]
pub enum RouteType {
    Tram = 0,
    Rail = 2,
    /// Sketched routes are exported as bus lines.
    #[default]
    Bus = 3,
    Ferry = 4,
}

pub type RouteId = Id<Route>;

/// One line of `routes.txt` for a sketched route.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    #[serde(rename = "route_id")]
    pub id: RouteId,

    /// Left out while the bundle has a single agency.
    pub agency_id: Option<AgencyId>,

    #[serde(rename = "route_short_name")]
    pub short_name: Option<String>,

    #[serde(rename = "route_long_name")]
    pub long_name: Option<String>,

    /// Display length of the sketch, e.g. "1.11 km".
    #[serde(rename = "route_desc")]
    pub description: Option<String>,

    #[serde(rename = "route_type")]
    pub kind: RouteType,

    #[serde(rename = "route_color")]
    pub color: Option<Color>,
}

impl HasId for Route {
    type IdType = String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_types_serialize_as_codes() {
        assert_eq!(serde_json::to_string(&RouteType::Bus).unwrap(), "3");
        let kind: RouteType = serde_json::from_str("0").unwrap();
        assert_eq!(kind, RouteType::Tram);
    }

    #[test]
    fn empty_fields_are_left_out() {
        let route = Route {
            id: Id::numbered("ROUTE", 1),
            agency_id: None,
            short_name: Some("R1".to_owned()),
            long_name: None,
            description: None,
            kind: RouteType::Bus,
            color: Some(Color::red()),
        };
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["route_id"], "ROUTE_1");
        assert_eq!(json["route_type"], 3);
        assert_eq!(json["route_color"], "FF0000");
        assert!(json.get("agency_id").is_none());
        assert!(json.get("route_long_name").is_none());
    }
}
