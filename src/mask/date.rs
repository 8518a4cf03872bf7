//! Date fields: `dd/mm/YYYY` on screen, `YYYY-mm-dd` on submit.

use chrono::NaiveDate;

use super::MaskError;

const DISPLAY_FORMAT: &str = "%d/%m/%Y";
const SUBMIT_FORMAT: &str = "%Y-%m-%d";

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Parses typed input in display or submit format.
pub fn parse_display_date(input: &str) -> Result<NaiveDate, MaskError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DISPLAY_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, SUBMIT_FORMAT))
        .map_err(|_| MaskError::InvalidDate(input.to_string()))
}

/// Converts typed input to the submitted value.
pub fn to_submit_date(input: &str) -> Result<String, MaskError> {
    parse_display_date(input).map(|d| d.format(SUBMIT_FORMAT).to_string())
}

/// Linked issue and due dates; the due date may not precede the issue date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    issue: Option<NaiveDate>,
    due: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(issue: Option<NaiveDate>, due: Option<NaiveDate>) -> Self {
        let mut range = Self { issue: None, due };
        range.set_issue(issue);
        range
    }

    pub fn issue(&self) -> Option<NaiveDate> {
        self.issue
    }

    pub fn due(&self) -> Option<NaiveDate> {
        self.due
    }

    /// Earliest selectable due date.
    pub fn min_due(&self) -> Option<NaiveDate> {
        self.issue
    }

    /// Changes the issue date, moving an earlier due date up to it.
    pub fn set_issue(&mut self, issue: Option<NaiveDate>) {
        self.issue = issue;
        if let (Some(issue), Some(due)) = (self.issue, self.due) {
            if due < issue {
                self.due = Some(issue);
            }
        }
    }

    /// Picks a due date; dates before the issue date are refused.
    pub fn set_due(&mut self, due: Option<NaiveDate>) -> Result<(), MaskError> {
        if let (Some(issue), Some(d)) = (self.issue, due) {
            if d < issue {
                return Err(MaskError::DueBeforeIssue {
                    issue: issue.format(SUBMIT_FORMAT).to_string(),
                    due: d.format(SUBMIT_FORMAT).to_string(),
                });
            }
        }
        self.due = due;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_display_and_submit_formats() {
        assert_eq!(format_display_date(date(2024, 3, 7)), "07/03/2024");
        assert_eq!(to_submit_date("07/03/2024"), Ok("2024-03-07".to_string()));
        assert_eq!(to_submit_date("2024-03-07"), Ok("2024-03-07".to_string()));
        assert_eq!(
            parse_display_date("31/02/2024"),
            Err(MaskError::InvalidDate("31/02/2024".to_string()))
        );
    }

    #[test]
    fn test_issue_moves_due_forward() {
        let mut range = DateRange::new(None, Some(date(2024, 1, 10)));
        range.set_issue(Some(date(2024, 2, 1)));
        assert_eq!(range.min_due(), Some(date(2024, 2, 1)));
        assert_eq!(range.due(), Some(date(2024, 2, 1)));
    }

    #[test]
    fn test_initial_values_are_linked() {
        let range = DateRange::new(Some(date(2024, 5, 1)), Some(date(2024, 4, 1)));
        assert_eq!(range.due(), Some(date(2024, 5, 1)));
    }

    #[test]
    fn test_due_before_issue_refused() {
        let mut range = DateRange::new(Some(date(2024, 5, 1)), None);
        assert!(matches!(
            range.set_due(Some(date(2024, 4, 30))),
            Err(MaskError::DueBeforeIssue { .. })
        ));
        assert_eq!(range.due(), None);
        assert_eq!(range.set_due(Some(date(2024, 5, 1))), Ok(()));
    }
}
