//! Route templates for request spans.

use uuid::Uuid;

/// Replace UUID path segments with `{uuid}` so spans for the same route group
/// together.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_templated() {
        let path = format!("/orders/{}", Uuid::nil());

        assert_eq!(route_template(&path), "/orders/{uuid}");
    }

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(route_template("/"), "/");
        assert_eq!(route_template("/cart/count"), "/cart/count");
    }
}
