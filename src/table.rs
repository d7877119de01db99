use std::fmt;

use crate::core::Post;

/// One table row; `sentiment` is the slot for the classification column
#[derive(Debug, Clone, PartialEq)]
pub struct Row<S = ()> {
    pub post: Post,
    /// Character count of the raw text
    pub length: usize,
    pub sentiment: S,
}

/// Posts in fetch order, one row each.
///
/// Rows are fixed at construction, derived columns are only ever added
/// through [`PostTable::with_column`].
#[derive(Debug, Clone, PartialEq)]
pub struct PostTable<S = ()> {
    rows: Vec<Row<S>>,
}

impl PostTable<()> {
    pub fn from_posts(posts: Vec<Post>) -> Self {
        Self {
            rows: posts
                .into_iter()
                .map(|post| Row {
                    length: post.text.chars().count(),
                    post,
                    sentiment: (),
                })
                .collect(),
        }
    }
}

impl<S> PostTable<S> {
    pub fn rows(&self) -> &[Row<S>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row<S>> {
        self.rows.iter()
    }

    /// Fill the sentiment slot of every row from that row's post
    pub fn with_column<T>(self, mut derive: impl FnMut(&Post) -> T) -> PostTable<T> {
        PostTable {
            rows: self
                .rows
                .into_iter()
                .map(|row| Row {
                    sentiment: derive(&row.post),
                    post: row.post,
                    length: row.length,
                })
                .collect(),
        }
    }

    pub fn preview(&self, limit: usize) -> Preview<'_, S> {
        Preview {
            rows: &self.rows[..limit.min(self.rows.len())],
        }
    }
}

impl<'l, S> IntoIterator for &'l PostTable<S> {
    type Item = &'l Row<S>;
    type IntoIter = std::slice::Iter<'l, Row<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// How a derived column shows up in a [`Preview`]
pub trait ExtraColumn {
    const HEADER: Option<&'static str>;
    fn cell(&self) -> String;
}

impl ExtraColumn for () {
    const HEADER: Option<&'static str> = None;

    fn cell(&self) -> String {
        String::new()
    }
}

const TEXT_WIDTH: usize = 40;

fn shorten(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > TEXT_WIDTH {
        let mut short = flat.chars().take(TEXT_WIDTH - 3).collect::<String>();
        short.push_str("...");
        short
    } else {
        flat
    }
}

/// First rows of a table rendered as text
pub struct Preview<'l, S> {
    rows: &'l [Row<S>],
}

impl<S: ExtraColumn> fmt::Display for Preview<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}  {:<TEXT_WIDTH$}  {:>4}  {:>20}  {:<20}  {:<20}  {:>6}  {:>6}",
            "", "Text", "Len", "ID", "Date", "Source", "Likes", "Shares"
        )?;
        if let Some(header) = S::HEADER {
            write!(f, "  {header:>3}")?;
        }
        writeln!(f)?;

        for (index, row) in self.rows.iter().enumerate() {
            write!(
                f,
                "{:>3}  {:<TEXT_WIDTH$}  {:>4}  {:>20}  {:<20}  {:<20}  {:>6}  {:>6}",
                index,
                shorten(&row.post.text),
                row.length,
                row.post.post_id,
                row.post.created_at.format("%Y-%m-%d %H:%M:%S"),
                row.post.source,
                row.post.like_count,
                row.post.share_count,
            )?;
            if S::HEADER.is_some() {
                write!(f, "  {:>3}", row.sentiment.cell())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(post_id: u64, text: &str) -> Post {
        Post {
            post_id,
            text: text.to_owned(),
            created_at: chrono::Utc::now(),
            source: "WebClient".to_owned(),
            like_count: post_id * 2,
            share_count: post_id,
        }
    }

    #[test]
    fn test_one_row_per_post_in_fetch_order() {
        let table = PostTable::from_posts(vec![post(3, "third"), post(1, "first"), post(2, "x")]);

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.iter().map(|row| row.post.post_id).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let table = PostTable::from_posts(vec![post(1, "héllo wörld"), post(2, "")]);

        assert_eq!(table.rows()[0].length, 11);
        assert_eq!(table.rows()[1].length, 0);
    }

    #[test]
    fn test_with_column_keeps_rows() {
        let table = PostTable::from_posts(vec![post(1, "a"), post(2, "bb")]);
        let tagged = table.clone().with_column(|post| post.text.len() * 10);

        assert_eq!(tagged.len(), table.len());
        assert_eq!(
            tagged.iter().map(|row| row.sentiment).collect::<Vec<_>>(),
            vec![10, 20]
        );
        assert_eq!(tagged.rows()[1].post, table.rows()[1].post);
    }

    #[test]
    fn test_preview_limits_rows() {
        let table = PostTable::from_posts((0..12).map(|id| post(id, "some text")).collect());
        let rendered = table.preview(10).to_string();

        // header plus ten rows
        assert_eq!(rendered.lines().count(), 11);
        assert!(rendered.lines().next().unwrap().contains("Shares"));

        let short = PostTable::from_posts(vec![post(1, "only")]);
        assert_eq!(short.preview(10).to_string().lines().count(), 2);
    }

    #[test]
    fn test_shorten_long_text() {
        let long = "word ".repeat(30);
        let short = shorten(&long);
        assert_eq!(short.chars().count(), TEXT_WIDTH);
        assert!(short.ends_with("..."));
    }
}
