use std::cell::{Cell, RefCell};

use tipper::{Notify, Report, ReportKind};

#[derive(Default)]
pub struct RecordingNotifier {
    reports: RefCell<Vec<Report>>,
    resets: Cell<usize>,
}

impl RecordingNotifier {
    pub fn reports(&self) -> Vec<Report> { self.reports.borrow().clone() }

    pub fn errors(&self) -> Vec<String> { self.messages(ReportKind::Error) }

    pub fn successes(&self) -> Vec<String> { self.messages(ReportKind::Success) }

    pub fn resets(&self) -> usize { self.resets.get() }

    fn messages(&self, kind: ReportKind) -> Vec<String> {
        self.reports
            .borrow()
            .iter()
            .filter(|report| report.kind == kind)
            .map(|report| report.message.clone())
            .collect()
    }
}

impl Notify for RecordingNotifier {
    fn report(&self, report: Report) { self.reports.borrow_mut().push(report); }

    fn reset_form(&self) { self.resets.set(self.resets.get() + 1); }
}
