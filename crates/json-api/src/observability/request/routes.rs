//! Route labels for request spans and metrics.

use uuid::Uuid;

/// Replace id segments so every product, order or cart line shares one label.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
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
    fn ids_are_collapsed() {
        let order = Uuid::now_v7();

        assert_eq!(
            route_label(&format!("/orders/{order}/status")),
            "/orders/{uuid}/status"
        );
        assert_eq!(route_label("/cart/items/"), "/cart/items");
        assert_eq!(route_label("/"), "/");
    }
}
