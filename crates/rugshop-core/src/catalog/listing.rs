//! Admin product table: ordering and free-text search.

use std::cmp::Reverse;

use super::Product;

/// Newest first by `created_at`; undated records go last, in their
/// original order.
pub fn sort_newest_first(products: &mut [Product]) {
    products.sort_by_key(|p| match p.created_at {
        Some(ts) => (0, Reverse(ts)),
        None => (1, Reverse(i64::MIN)),
    });
}

/// Case-insensitive substring search across title, category, description,
/// product id and document id. An empty query returns every row.
pub fn admin_search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return products.iter().collect();
    }

    products
        .iter()
        .filter(|p| {
            [
                p.title.as_str(),
                p.category.as_str(),
                p.description.as_str(),
                p.product_id.as_str(),
                p.id.as_str(),
            ]
            .join(" ")
            .to_lowercase()
            .contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, created_at: Option<i64>) -> Product {
        Product {
            id: id.to_string(),
            created_at,
            ..Product::default()
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut rows = vec![
            row("old", Some(100)),
            row("undated-a", None),
            row("new", Some(300)),
            row("mid", Some(200)),
            row("undated-b", None),
        ];
        sort_newest_first(&mut rows);
        let ids: Vec<_> = rows.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old", "undated-a", "undated-b"]);
    }

    #[test]
    fn test_admin_search_fields() {
        let rows = vec![
            Product {
                id: "docA".into(),
                title: "Heriz".into(),
                product_id: "1234567".into(),
                ..Product::default()
            },
            Product {
                id: "docB".into(),
                title: "Kazak".into(),
                description: "Hand-knotted wool".into(),
                category: "Runner Rugs".into(),
                ..Product::default()
            },
        ];

        assert_eq!(admin_search(&rows, "").len(), 2);
        assert_eq!(admin_search(&rows, "WOOL")[0].id, "docB");
        assert_eq!(admin_search(&rows, "runner")[0].id, "docB");
        assert_eq!(admin_search(&rows, "234")[0].id, "docA");
        assert_eq!(admin_search(&rows, "doca")[0].id, "docA");
        assert!(admin_search(&rows, "silk").is_empty());
    }
}
