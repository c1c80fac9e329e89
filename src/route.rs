//! Navigation targets and their URL form.

use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ReviewMode {
    /// Free practice over every completed standard level.
    Practice,
    /// The review round of an auto-review level, over an inclusive level range.
    #[serde(rename_all = "camelCase")]
    Auto {
        start: usize,
        end: usize,
        level_index: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum Route {
    Difficulty,
    #[serde(rename_all = "camelCase")]
    Map { scroll_to: Option<usize> },
    Level { index: usize },
    Review { review: ReviewMode },
    Victory,
}

impl Route {
    pub fn map() -> Route {
        Route::Map { scroll_to: None }
    }

    pub fn to_path(&self) -> String {
        match *self {
            Route::Difficulty => "/".to_string(),
            Route::Map { scroll_to: None } => "/map".to_string(),
            Route::Map { scroll_to: Some(n) } => format!("/map?scrollTo={n}"),
            Route::Level { index } => format!("/level/{index}"),
            Route::Review {
                review: ReviewMode::Practice,
            } => "/review?mode=practice".to_string(),
            Route::Review {
                review: ReviewMode::Auto { start, end, level_index },
            } => format!("/review?mode=auto&start={start}&end={end}&levelIndex={level_index}"),
            Route::Victory => "/victory".to_string(),
        }
    }

    /// Inverse of [`Route::to_path`]. Never fails: anything unrecognized is the
    /// difficulty screen. A leading `#` is accepted so `location.hash` can be
    /// passed as is.
    pub fn parse(path: &str) -> Route {
        let path = path.trim().trim_start_matches('#');
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let param = |name: &str| -> Option<&str> {
            query
                .split('&')
                .filter_map(|kv| kv.split_once('='))
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v)
        };
        let number = |name: &str| param(name).and_then(|v| v.parse::<usize>().ok());

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["map"] => Route::Map {
                scroll_to: number("scrollTo"),
            },
            ["level", n] => match n.parse() {
                Ok(index) => Route::Level { index },
                Err(_) => Route::Difficulty,
            },
            ["review"] => match param("mode") {
                Some("practice") => Route::Review {
                    review: ReviewMode::Practice,
                },
                Some("auto") => match (number("start"), number("end"), number("levelIndex")) {
                    (Some(start), Some(end), Some(level_index)) => Route::Review {
                        review: ReviewMode::Auto { start, end, level_index },
                    },
                    _ => Route::Difficulty,
                },
                _ => Route::Difficulty,
            },
            ["victory"] => Route::Victory,
            _ => Route::Difficulty,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        assert_eq!(Route::Difficulty.to_path(), "/");
        assert_eq!(Route::map().to_path(), "/map");
        assert_eq!(Route::Map { scroll_to: Some(4) }.to_path(), "/map?scrollTo=4");
        assert_eq!(Route::Level { index: 7 }.to_path(), "/level/7");
        let auto = Route::Review {
            review: ReviewMode::Auto { start: 0, end: 3, level_index: 4 },
        };
        assert_eq!(auto.to_path(), "/review?mode=auto&start=0&end=3&levelIndex=4");
    }

    #[test]
    fn parse_accepts_hash_and_query_order() {
        assert_eq!(Route::parse("#/level/3"), Route::Level { index: 3 });
        assert_eq!(
            Route::parse("/review?levelIndex=9&end=8&mode=auto&start=6"),
            Route::Review {
                review: ReviewMode::Auto { start: 6, end: 8, level_index: 9 }
            }
        );
        assert_eq!(Route::parse("/map?scrollTo=x"), Route::map());
    }

    #[test]
    fn parse_is_total() {
        for junk in ["", "/nowhere", "/level/abc", "/review", "/review?mode=auto&start=1", "/level/1/2"] {
            assert_eq!(Route::parse(junk), Route::Difficulty, "{junk}");
        }
        assert_eq!(Route::parse("/victory"), Route::Victory);
    }
}
