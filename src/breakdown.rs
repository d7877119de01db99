use std::fmt;

use strum::IntoEnumIterator;

use crate::{error::Error, sentiment::SentimentLabel, table::PostTable};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelShare {
    pub label: SentimentLabel,
    pub count: usize,
    pub percent: f64,
}

/// Posts per sentiment label, as counts and as share of all posts
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentBreakdown {
    pub total: usize,
    /// One entry per label: positive, neutral, negative
    pub shares: Vec<LabelShare>,
}

impl SentimentBreakdown {
    pub fn compute(table: &PostTable<SentimentLabel>) -> Result<Self, Error> {
        if table.is_empty() {
            return Err(Error::ZeroPosts);
        }

        let total = table.len();
        let shares = SentimentLabel::iter()
            .map(|label| {
                let count = table.iter().filter(|row| row.sentiment == label).count();
                LabelShare {
                    label,
                    count,
                    percent: count as f64 * 100.0 / total as f64,
                }
            })
            .collect();

        Ok(Self { total, shares })
    }
}

impl fmt::Display for SentimentBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for share in &self.shares {
            writeln!(
                f,
                "Percentage of {} posts: {}%",
                share.label, share.percent
            )?;
        }
        Ok(())
    }
}
