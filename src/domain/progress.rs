use log::info;

/// Track progress of a match import
pub struct ImportProgress {
    total: usize,
    imported: usize,
    skipped: usize,
    failed: usize,
}

impl ImportProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            imported: 0,
            skipped: 0,
            failed: 0,
        }
    }

    pub fn increment_imported(&mut self) {
        self.imported += 1;
        self.log_progress();
    }

    pub fn increment_skipped(&mut self) {
        self.skipped += 1;
        self.log_progress();
    }

    pub fn increment_failed(&mut self) {
        self.failed += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.imported + self.skipped + self.failed
    }

    pub fn imported(&self) -> usize {
        self.imported
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!(
                "  → Progress: {}/{} ({} new, {} already stored, {} failed)",
                current, self.total, self.imported, self.skipped, self.failed
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || current == total
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}
