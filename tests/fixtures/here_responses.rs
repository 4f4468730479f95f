//! Recorded-style route responses.
//!
//! Route 0 runs through Manhattan in two sections that share their joining
//! point; route 1 is an unrelated hop in Philadelphia.

#![allow(dead_code)]

/// Lower Manhattan → Empire State Building.
pub const SECTION_DOWNTOWN: &str = "BFg3v4Hvp2jOovDo5DovD0F";
pub const SECTION_DOWNTOWN_POINTS: &[(f64, f64)] =
    &[(40.7128, -74.0060), (40.7306, -73.9866), (40.7484, -73.9857)];

/// Empire State Building → Central Park.
pub const SECTION_MIDTOWN: &str = "BFw124HzqyjOg8BoB07E09D";
pub const SECTION_MIDTOWN_POINTS: &[(f64, f64)] =
    &[(40.7484, -73.9857), (40.7580, -73.9855), (40.7829, -73.9654)];

pub const SECTION_PHILADELPHIA: &str = "BF4n7zHv24qO41B4_B";

/// Legacy polyline of route 0 only.
pub const FIRST_ROUTE_POLYLINE: &str = "_vnwFnhubMgnBgxBgnBsD??_{@g@szCs|B";

/// Legacy polyline of both routes flattened.
pub const ALL_ROUTES_POLYLINE: &str = "_vnwFnhubMgnBgxBgnBsD??_{@g@szCs|BjdaDviiFwt@w~@";

/// 2021-01-05T09:46:08Z
pub const DEPARTURE_EPOCH: i64 = 1_609_839_968;

pub const TWO_ROUTES: &str = r#"{
  "routes": [
    {
      "id": "a1b2c3",
      "sections": [
        {
          "id": "s-0",
          "type": "vehicle",
          "actions": [
            {"action": "depart", "duration": 312, "length": 2410, "instruction": "Head north.", "offset": 0},
            {"action": "turn", "duration": 95, "length": 2003, "direction": "left", "offset": 1},
            {"action": "arrive", "duration": 0, "length": 0, "offset": 2}
          ],
          "departure": {"time": "2021-01-05T04:46:08-05:00", "place": {"type": "place", "location": {"lat": 40.7128, "lng": -74.006}}},
          "arrival": {"time": "2021-01-05T04:52:55-05:00", "place": {"type": "place", "location": {"lat": 40.7484, "lng": -73.9857}}},
          "polyline": "BFg3v4Hvp2jOovDo5DovD0F",
          "transport": {"mode": "car"}
        },
        {
          "id": "s-1",
          "type": "vehicle",
          "actions": [
            {"action": "depart", "duration": 200, "length": 1100, "offset": 0},
            {"action": "arrive", "duration": 0, "length": 0, "offset": 2}
          ],
          "departure": {"time": "2021-01-05T04:52:55-05:00"},
          "arrival": {"time": "2021-01-05T04:56:15-05:00"},
          "polyline": "BFw124HzqyjOg8BoB07E09D",
          "transport": {"mode": "car"}
        }
      ]
    },
    {
      "id": "d4e5f6",
      "sections": [
        {
          "id": "s-2",
          "type": "vehicle",
          "actions": [{"action": "depart", "duration": 150, "length": 1200, "offset": 0}],
          "departure": {"time": "2021-01-05T09:00:00Z"},
          "polyline": "BF4n7zHv24qO41B4_B",
          "transport": {"mode": "car"}
        }
      ]
    }
  ]
}"#;

pub const NO_ROUTES: &str = r#"{"routes": [], "notices": [{"title": "Route calculation failed", "code": "couldNotMatchOrigin"}]}"#;

/// Second section's polyline lost its final character in transit.
pub const CORRUPT_SECOND_SECTION: &str = r#"{
  "routes": [
    {
      "sections": [
        {
          "actions": [{"action": "depart", "duration": 10, "offset": 0}],
          "departure": {"time": "2021-01-05T09:46:08Z"},
          "polyline": "BFg3v4Hvp2jOovDo5DovD0F"
        },
        {
          "polyline": "BFw124HzqyjOg8BoB07E09"
        }
      ]
    }
  ]
}"#;
