use crate::{
    core::DateTime,
    table::{PostTable, Row},
};

/// Values keyed by post timestamp, in table order (no sorting)
#[derive(Debug, Clone, PartialEq)]
pub struct Series<T> {
    pub label: &'static str,
    pub points: Vec<(DateTime, T)>,
}

impl<T: Copy + Into<f64>> Series<T> {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, value)| (*value).into()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceShare {
    pub source: String,
    pub count: usize,
    pub percent: f64,
}

pub fn mean_length<S>(table: &PostTable<S>) -> Option<f64> {
    if table.is_empty() {
        return None;
    }
    let total: usize = table.iter().map(|row| row.length).sum();
    Some(total as f64 / table.len() as f64)
}

/// Index of the first row holding the maximum of `key`
fn first_max_index<S>(table: &PostTable<S>, key: impl Fn(&Row<S>) -> u64) -> Option<usize> {
    table
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, u64)>, (index, row)| {
            let value = key(row);
            match best {
                Some((_, best_value)) if best_value >= value => best,
                _ => Some((index, value)),
            }
        })
        .map(|(index, _)| index)
}

pub fn most_liked<S>(table: &PostTable<S>) -> Option<usize> {
    first_max_index(table, |row| row.post.like_count)
}

pub fn most_shared<S>(table: &PostTable<S>) -> Option<usize> {
    first_max_index(table, |row| row.post.share_count)
}

pub fn length_series<S>(table: &PostTable<S>) -> Series<u32> {
    Series {
        label: "Length",
        points: table
            .iter()
            .map(|row| {
                let length = u32::try_from(row.length).unwrap_or(u32::MAX);
                (row.post.created_at, length)
            })
            .collect(),
    }
}

pub fn like_series<S>(table: &PostTable<S>) -> Series<u32> {
    Series {
        label: "Likes",
        points: table
            .iter()
            .map(|row| (row.post.created_at, saturate(row.post.like_count)))
            .collect(),
    }
}

pub fn share_series<S>(table: &PostTable<S>) -> Series<u32> {
    Series {
        label: "Retweets",
        points: table
            .iter()
            .map(|row| (row.post.created_at, saturate(row.post.share_count)))
            .collect(),
    }
}

fn saturate(count: u64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Share of posts per distinct source string, in first-appearance order
pub fn source_distribution<S>(table: &PostTable<S>) -> Vec<SourceShare> {
    let mut shares: Vec<SourceShare> = Vec::new();
    for row in table {
        match shares.iter_mut().find(|share| share.source == row.post.source) {
            Some(share) => share.count += 1,
            None => shares.push(SourceShare {
                source: row.post.source.clone(),
                count: 1,
                percent: 0.0,
            }),
        }
    }

    let total = table.len() as f64;
    for share in &mut shares {
        share.percent = share.count as f64 * 100.0 / total;
    }
    shares
}

/// Everything the report prints and charts, computed without side effects
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mean_length: Option<f64>,
    pub most_liked: Option<usize>,
    pub most_shared: Option<usize>,
    pub length: Series<u32>,
    pub likes: Series<u32>,
    pub shares: Series<u32>,
    pub sources: Vec<SourceShare>,
}

impl Summary {
    pub fn compute<S>(table: &PostTable<S>) -> Self {
        Self {
            mean_length: mean_length(table),
            most_liked: most_liked(table),
            most_shared: most_shared(table),
            length: length_series(table),
            likes: like_series(table),
            shares: share_series(table),
            sources: source_distribution(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::core::Post;

    fn post(text: &str, likes: u64, shares: u64, source: &str) -> Post {
        Post {
            post_id: likes * 1000 + shares,
            text: text.to_owned(),
            created_at: chrono::Utc::now(),
            source: source.to_owned(),
            like_count: likes,
            share_count: shares,
        }
    }

    fn table_of_lengths(lengths: &[usize]) -> PostTable {
        PostTable::from_posts(
            lengths
                .iter()
                .map(|length| post(&"x".repeat(*length), 0, 0, "WebClient"))
                .collect(),
        )
    }

    #[test]
    fn test_mean_length_of_three() {
        assert_eq!(mean_length(&table_of_lengths(&[10, 20, 30])), Some(20.0));
    }

    #[test]
    fn test_mean_length_matches_manual_average() {
        let texts = ["a", "hello", "hello world", "the quick brown fox", ""];
        let table = PostTable::from_posts(texts.iter().map(|text| post(text, 0, 0, "w")).collect());

        let manual = texts.iter().map(|text| text.len()).sum::<usize>() as f64 / texts.len() as f64;
        assert_eq!(mean_length(&table), Some(manual));
        assert_eq!(mean_length(&PostTable::from_posts(vec![])), None);
    }

    #[test]
    fn test_most_liked_first_occurrence() {
        let table = PostTable::from_posts(vec![
            post("a", 5, 1, "w"),
            post("b", 50, 1, "w"),
            post("c", 5, 1, "w"),
        ]);
        assert_eq!(most_liked(&table), Some(1));
        // every share count ties, so the first row wins
        assert_eq!(most_shared(&table), Some(0));

        let tie = PostTable::from_posts(vec![
            post("a", 1, 3, "w"),
            post("b", 9, 7, "w"),
            post("c", 9, 7, "w"),
        ]);
        assert_eq!(most_liked(&tie), Some(1));
        assert_eq!(most_shared(&tie), Some(1));
        assert_eq!(most_liked(&PostTable::from_posts(vec![])), None);
    }

    #[test]
    fn test_source_distribution() {
        let table = PostTable::from_posts(vec![
            post("a", 0, 0, "WebClient"),
            post("b", 0, 0, "MobileClient"),
            post("c", 0, 0, "WebClient"),
        ]);
        let shares = source_distribution(&table);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].source, "WebClient");
        assert_eq!(shares[0].count, 2);
        assert!((shares[0].percent - 66.67).abs() < 0.01);
        assert_eq!(shares[1].source, "MobileClient");
        assert!((shares[1].percent - 33.33).abs() < 0.01);
    }

    #[test]
    fn test_source_match_is_case_sensitive() {
        let table = PostTable::from_posts(vec![
            post("a", 0, 0, "webclient"),
            post("b", 0, 0, "WebClient"),
        ]);
        assert_eq!(source_distribution(&table).len(), 2);
    }

    #[test]
    fn test_series_keep_table_order() {
        let early = chrono::Utc.with_ymd_and_hms(2018, 10, 10, 8, 0, 0).unwrap();
        let late = chrono::Utc.with_ymd_and_hms(2018, 10, 10, 20, 0, 0).unwrap();
        let table = PostTable::from_posts(vec![
            Post {
                created_at: early,
                ..post("older but listed first", 3, 1, "w")
            },
            Post {
                created_at: late,
                ..post("newer", 8, 2, "w")
            },
        ]);
        let summary = Summary::compute(&table);

        assert_eq!(summary.length.points, vec![(early, 22), (late, 5)]);
        assert_eq!(summary.likes.values(), vec![3.0, 8.0]);
        assert_eq!(summary.shares.values(), vec![1.0, 2.0]);
    }
}
