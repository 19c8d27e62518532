// crates/agenticops-core/src/cards.rs
// Registry of card type metadata for rendering decisions

use agenticops_types::CardKind;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTypeMeta {
    pub label: &'static str,
    pub default_width: f64,
    pub default_height: f64,
    pub min_width: f64,
    pub min_height: f64,
}

pub fn card_meta(kind: CardKind) -> CardTypeMeta {
    match kind {
        CardKind::DataTable => CardTypeMeta {
            label: "Data Table",
            default_width: 440.0,
            default_height: 320.0,
            min_width: 300.0,
            min_height: 200.0,
        },
        CardKind::BarChart => CardTypeMeta {
            label: "Bar Chart",
            default_width: 440.0,
            default_height: 300.0,
            min_width: 300.0,
            min_height: 250.0,
        },
        CardKind::LineChart => CardTypeMeta {
            label: "Line Chart",
            default_width: 440.0,
            default_height: 300.0,
            min_width: 300.0,
            min_height: 250.0,
        },
        CardKind::AlertSummary => CardTypeMeta {
            label: "Alert Summary",
            default_width: 400.0,
            default_height: 320.0,
            min_width: 280.0,
            min_height: 200.0,
        },
        CardKind::TextReport => CardTypeMeta {
            label: "Text Report",
            default_width: 440.0,
            default_height: 350.0,
            min_width: 300.0,
            min_height: 200.0,
        },
        CardKind::NetworkHealth => CardTypeMeta {
            label: "Network Health",
            default_width: 400.0,
            default_height: 280.0,
            min_width: 280.0,
            min_height: 200.0,
        },
    }
}

// ═══════════════════════════════════════
// DATA TABLE SORTING
// ═══════════════════════════════════════

/// Compare cells so that embedded numbers order by value ("ap2" < "ap10")
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let mut na = String::new();
                while let Some(c) = a.next_if(|c| c.is_ascii_digit()) {
                    na.push(c);
                }
                let mut nb = String::new();
                while let Some(c) = b.next_if(|c| c.is_ascii_digit()) {
                    nb.push(c);
                }
                let ta = na.trim_start_matches('0');
                let tb = nb.trim_start_matches('0');
                let ord = ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_lowercase().cmp(y.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                a.next();
                b.next();
            }
        }
    }
}

/// Row order for a data table card sorted on `column`; missing cells sort as empty
pub fn sorted_rows(rows: &[Vec<String>], column: usize, ascending: bool) -> Vec<Vec<String>> {
    let mut out = rows.to_vec();
    out.sort_by(|a, b| {
        let av = a.get(column).map(String::as_str).unwrap_or("");
        let bv = b.get(column).map(String::as_str).unwrap_or("");
        let ord = natural_cmp(av, bv);
        if ascending { ord } else { ord.reverse() }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_respect_minimums() {
        for kind in CardKind::ALL {
            let meta = card_meta(kind);
            assert!(meta.default_width >= meta.min_width, "{:?}", kind);
            assert!(meta.default_height >= meta.min_height, "{:?}", kind);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(card_meta(CardKind::NetworkHealth).label, "Network Health");
        assert_eq!(card_meta(CardKind::DataTable).label, "Data Table");
    }

    #[test]
    fn test_natural_cmp_orders_numbers_by_value() {
        assert_eq!(natural_cmp("ap2", "ap10"), Ordering::Less);
        assert_eq!(natural_cmp("10", "9"), Ordering::Greater);
        assert_eq!(natural_cmp("Branch", "branch"), Ordering::Equal);
        assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
    }

    #[test]
    fn test_sorted_rows_by_column() {
        let rows = vec![
            vec!["b".to_string(), "12".to_string()],
            vec!["a".to_string(), "3".to_string()],
            vec!["c".to_string()],
        ];
        let asc = sorted_rows(&rows, 1, true);
        assert_eq!(asc[0][0], "c");
        assert_eq!(asc[1][0], "a");
        assert_eq!(asc[2][0], "b");

        let desc = sorted_rows(&rows, 0, false);
        assert_eq!(desc[0][0], "c");
        assert_eq!(rows[0][0], "b");
    }
}
