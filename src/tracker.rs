//! In-memory attendance state with write-through persistence.
//!
//! Collections are read once in [`Tracker::open`]; every mutation rewrites
//! the whole affected collection before returning.

use crate::error::{StoreError, TrackerError};
use crate::export::{self, CsvExport};
use crate::ledger::Ledger;
use crate::model::{AttendanceRecord, Class, Session, Status};
use crate::roster::Roster;
use crate::session::CredentialVerifier;
use crate::stats::{self, ClassStats, DaySummary};
use crate::store::{BlobRepository, KeyValueStore, LEDGER_KEY, ROSTER_KEY, SESSION_KEY};
use tracing::{debug, info, warn};

const SESSION_REPO: BlobRepository<Session> = BlobRepository::new(SESSION_KEY);
const ROSTER_REPO: BlobRepository<Roster> = BlobRepository::new(ROSTER_KEY);
const LEDGER_REPO: BlobRepository<Ledger> = BlobRepository::new(LEDGER_KEY);

/// Today's local date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub struct Tracker {
    store: Box<dyn KeyValueStore>,
    credentials: Box<dyn CredentialVerifier>,
    session: Option<Session>,
    roster: Roster,
    ledger: Ledger,
    selected_class: Option<String>,
}

impl Tracker {
    /// Loads session, roster and ledger. A missing roster is seeded and
    /// written back. A malformed roster or ledger is an error; a malformed
    /// session is discarded.
    pub fn open(
        store: Box<dyn KeyValueStore>,
        credentials: Box<dyn CredentialVerifier>,
    ) -> Result<Self, StoreError> {
        // Restored as stored, without re-checking credentials.
        let session = match SESSION_REPO.load(store.as_ref()) {
            Ok(s) => s,
            Err(StoreError::Corrupt { key, source }) => {
                warn!(key, error = %source, "discarding malformed session record");
                SESSION_REPO.clear(store.as_ref())?;
                None
            }
            Err(e) => return Err(e),
        };

        let roster = match ROSTER_REPO.load(store.as_ref())? {
            Some(r) => r,
            None => {
                let seeded = Roster::seed();
                ROSTER_REPO.save(store.as_ref(), &seeded)?;
                info!(classes = seeded.classes().len(), "seeded sample roster");
                seeded
            }
        };
        let ledger = LEDGER_REPO.load(store.as_ref())?.unwrap_or_default();

        debug!(
            logged_in = session.is_some(),
            classes = roster.classes().len(),
            records = ledger.len(),
            "tracker state loaded"
        );
        Ok(Self {
            store,
            credentials,
            session,
            roster,
            ledger,
            selected_class: None,
        })
    }

    // Mutations edit a copy and swap it in only after the write succeeds,
    // so a failed save leaves memory matching the store.

    fn commit_roster(&mut self, roster: Roster) -> Result<(), StoreError> {
        ROSTER_REPO.save(self.store.as_ref(), &roster)?;
        self.roster = roster;
        Ok(())
    }

    fn commit_ledger(&mut self, ledger: Ledger) -> Result<(), StoreError> {
        LEDGER_REPO.save(self.store.as_ref(), &ledger)?;
        self.ledger = ledger;
        Ok(())
    }

    fn resolve_class(&self, class_id: Option<&str>) -> Result<String, TrackerError> {
        class_id
            .filter(|c| !c.trim().is_empty())
            .or(self.selected_class.as_deref())
            .map(|c| c.to_string())
            .ok_or(TrackerError::NoClassSelected)
    }

    // ---- session ----

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<&Session, TrackerError> {
        let Some(session) = self.credentials.verify(username, password) else {
            warn!(username, "login rejected");
            return Err(TrackerError::InvalidCredentials);
        };
        SESSION_REPO.save(self.store.as_ref(), &session)?;
        info!(teacher = %session.teacher_name, "teacher logged in");
        Ok(self.session.insert(session))
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        if let Some(s) = self.session.take() {
            info!(teacher = %s.teacher_name, "teacher logged out");
        }
        SESSION_REPO.clear(self.store.as_ref())
    }

    // ---- roster ----

    pub fn classes(&self) -> &[Class] {
        self.roster.classes()
    }

    pub fn class(&self, class_id: &str) -> Option<&Class> {
        self.roster.class(class_id)
    }

    pub fn selected_class(&self) -> Option<&str> {
        self.selected_class.as_deref()
    }

    pub fn select_class(&mut self, class_id: Option<&str>) -> Result<(), TrackerError> {
        match class_id {
            None => self.selected_class = None,
            Some(id) => {
                if self.roster.class(id).is_none() {
                    return Err(TrackerError::ClassNotFound(id.to_string()));
                }
                self.selected_class = Some(id.to_string());
            }
        }
        Ok(())
    }

    /// Returns the new class id, or `None` when a field was blank.
    pub fn create_class(
        &mut self,
        name: &str,
        subject: &str,
    ) -> Result<Option<String>, StoreError> {
        let mut roster = self.roster.clone();
        let Some(id) = roster.create_class(name, subject) else {
            return Ok(None);
        };
        self.commit_roster(roster)?;
        info!(class_id = %id, "class created");
        Ok(Some(id))
    }

    /// Removes the class and all of its attendance records.
    ///
    /// The ledger is written first: if the roster write then fails, the
    /// store holds a class without records, never records without a class.
    pub fn delete_class(&mut self, class_id: &str) -> Result<bool, StoreError> {
        let mut ledger = self.ledger.clone();
        let dropped = ledger.remove_class(class_id);
        let mut roster = self.roster.clone();
        let removed = roster.delete_class(class_id);
        if dropped > 0 {
            self.commit_ledger(ledger)?;
        }
        if removed {
            self.commit_roster(roster)?;
        }
        if self.selected_class.as_deref() == Some(class_id) {
            self.selected_class = None;
        }
        info!(class_id, removed, records_dropped = dropped, "class deleted");
        Ok(removed)
    }

    /// Returns the new student id, or `None` when no class resolves, the
    /// class is unknown, or a field was blank.
    pub fn add_student(
        &mut self,
        class_id: Option<&str>,
        name: &str,
        roll_number: &str,
    ) -> Result<Option<String>, StoreError> {
        let Ok(class_id) = self.resolve_class(class_id) else {
            return Ok(None);
        };
        let mut roster = self.roster.clone();
        let Some(id) = roster.add_student(&class_id, name, roll_number) else {
            return Ok(None);
        };
        self.commit_roster(roster)?;
        info!(class_id = %class_id, student_id = %id, "student enrolled");
        Ok(Some(id))
    }

    /// Removes the student from the class and drops every record that
    /// references the student id. A student not enrolled in the class is
    /// left alone, records included.
    pub fn delete_student(
        &mut self,
        class_id: Option<&str>,
        student_id: &str,
    ) -> Result<bool, TrackerError> {
        let class_id = self.resolve_class(class_id)?;
        let Some(class) = self.roster.class(&class_id) else {
            return Err(TrackerError::ClassNotFound(class_id));
        };
        if class.student(student_id).is_none() {
            return Ok(false);
        }
        let mut ledger = self.ledger.clone();
        let dropped = ledger.remove_student(student_id);
        let mut roster = self.roster.clone();
        roster.delete_student(&class_id, student_id);
        if dropped > 0 {
            self.commit_ledger(ledger)?;
        }
        self.commit_roster(roster)?;
        info!(
            class_id = %class_id,
            student_id,
            records_dropped = dropped,
            "student removed"
        );
        Ok(true)
    }

    // ---- ledger ----

    pub fn records(&self) -> &[AttendanceRecord] {
        self.ledger.records()
    }

    pub fn mark_attendance(
        &mut self,
        student_id: &str,
        date: &str,
        status: Status,
        class_id: Option<&str>,
    ) -> Result<(), TrackerError> {
        let class_id = self.resolve_class(class_id)?;
        let class = self
            .roster
            .class(&class_id)
            .ok_or_else(|| TrackerError::ClassNotFound(class_id.clone()))?;
        if class.student(student_id).is_none() {
            return Err(TrackerError::StudentNotFound {
                class_id,
                student_id: student_id.to_string(),
            });
        }
        let mut ledger = self.ledger.clone();
        ledger.mark(student_id, date, status, &class_id);
        self.commit_ledger(ledger)?;
        debug!(
            class_id = %class_id,
            student_id,
            date,
            status = status.as_str(),
            "attendance marked"
        );
        Ok(())
    }

    /// Stamps `status` on the listed students (all students when `None`).
    /// Ids not enrolled in the class are skipped. Returns how many were
    /// marked.
    pub fn mark_all(
        &mut self,
        class_id: Option<&str>,
        date: &str,
        status: Status,
        student_ids: Option<&[String]>,
    ) -> Result<usize, TrackerError> {
        let class_id = self.resolve_class(class_id)?;
        let class = self
            .roster
            .class(&class_id)
            .ok_or_else(|| TrackerError::ClassNotFound(class_id.clone()))?;
        let targets: Vec<String> = match student_ids {
            None => class.students.iter().map(|s| s.id.clone()).collect(),
            Some(ids) => ids
                .iter()
                .filter(|id| class.student(id).is_some())
                .cloned()
                .collect(),
        };
        let mut ledger = self.ledger.clone();
        for sid in &targets {
            ledger.mark(sid, date, status, &class_id);
        }
        self.commit_ledger(ledger)?;
        debug!(class_id = %class_id, date, count = targets.len(), "attendance stamped");
        Ok(targets.len())
    }

    pub fn status(&self, student_id: &str, date: &str, class_id: &str) -> Option<Status> {
        self.ledger.status(student_id, date, class_id)
    }

    // ---- stats ----

    pub fn stats(&self, class_id: &str) -> ClassStats {
        stats::compute_stats(&self.ledger, class_id)
    }

    pub fn day_summary(&self, class_id: &str, date: &str) -> Result<DaySummary, TrackerError> {
        let class = self
            .roster
            .class(class_id)
            .ok_or_else(|| TrackerError::ClassNotFound(class_id.to_string()))?;
        Ok(stats::day_summary(class, &self.ledger, date))
    }

    // ---- export ----

    pub fn export_all(&self) -> Result<CsvExport, TrackerError> {
        if self.roster.is_empty() {
            return Err(TrackerError::NothingToExport);
        }
        Ok(export::export_all(self.roster.classes(), self.ledger.records()))
    }

    pub fn export_class(&self, class_id: &str) -> Result<CsvExport, TrackerError> {
        let class = self
            .roster
            .class(class_id)
            .ok_or(TrackerError::NothingToExport)?;
        Ok(export::export_class(class, self.ledger.records()))
    }

    pub fn export_matrix(&self, class_id: &str) -> Result<CsvExport, TrackerError> {
        let class = self
            .roster
            .class(class_id)
            .ok_or(TrackerError::NothingToExport)?;
        Ok(export::export_class_matrix(class, self.ledger.records()))
    }

    pub fn export_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<CsvExport, TrackerError> {
        export::export_range(
            self.roster.classes(),
            self.ledger.records(),
            start_date,
            end_date,
        )
    }
}
