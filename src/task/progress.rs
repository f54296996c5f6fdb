use std::fmt;

/// What a chunked computation reports after each chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress<T> {
    Running { processed: u64, total: u64 },
    Finished(T),
}

impl<T> Progress<T> {
    pub fn is_finished(&self) -> bool {
        matches!(self, Progress::Finished(_))
    }

    pub fn into_result(self) -> Option<T> {
        match self {
            Progress::Finished(value) => Some(value),
            Progress::Running { .. } => None,
        }
    }
}

impl<T> fmt::Display for Progress<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Running { processed, total } => write!(f, "{} / {}", processed, total),
            Progress::Finished(_) => write!(f, "done"),
        }
    }
}

/// Drives a chunked computation to the end, handing every intermediate
/// report to `on_progress`. Returns `None` when the iterator stopped
/// without finishing, i.e. it was cancelled.
pub fn drive<T, I>(chunks: I, mut on_progress: impl FnMut(u64, u64)) -> Option<T>
where
    I: IntoIterator<Item = Progress<T>>,
{
    for progress in chunks {
        match progress {
            Progress::Running { processed, total } => on_progress(processed, total),
            Progress::Finished(value) => return Some(value),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_collects_progress_and_result() {
        let reports = vec![
            Progress::Running { processed: 1, total: 3 },
            Progress::Running { processed: 2, total: 3 },
            Progress::Finished(42),
        ];
        let mut seen = Vec::new();
        let result = drive(reports, |processed, total| seen.push((processed, total)));
        assert_eq!(result, Some(42));
        assert_eq!(seen, vec![(1, 3), (2, 3)]);
    }

    #[test]
    fn drive_without_finish_is_none() {
        let reports: Vec<Progress<i32>> = vec![Progress::Running { processed: 1, total: 3 }];
        assert_eq!(drive(reports, |_, _| {}), None);
    }
}
