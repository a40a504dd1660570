//! In-memory collaborators shared by the controller and shell tests.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use client_core::{EmployeeService, TransportError};
use shared::domain::{Employee, EmployeeStatus, PersonId};

use crate::dialog::{Dialog, DialogHost, DialogKind, DialogOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    GetAll,
    GetByKey,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    GetAll,
    GetByKey(PersonId),
    Create(Employee),
    Update(Employee),
    Delete(PersonId),
}

#[derive(Default)]
struct FakeState {
    records: Vec<Employee>,
    failures: HashMap<Op, VecDeque<u16>>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub(crate) struct FakeEmployeeService {
    state: Mutex<FakeState>,
}

impl FakeEmployeeService {
    pub(crate) fn with_records(records: Vec<Employee>) -> Arc<Self> {
        let service = Self::default();
        service.state.lock().unwrap().records = records;
        Arc::new(service)
    }

    /// The next call of `op` fails with `status`.
    pub(crate) fn fail_next(&self, op: Op, status: u16) {
        self.state
            .lock()
            .unwrap()
            .failures
            .entry(op)
            .or_default()
            .push_back(status);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn count(&self, op: Op) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(
                    (op, call),
                    (Op::GetAll, Call::GetAll)
                        | (Op::GetByKey, Call::GetByKey(_))
                        | (Op::Create, Call::Create(_))
                        | (Op::Update, Call::Update(_))
                        | (Op::Delete, Call::Delete(_))
                )
            })
            .count()
    }

    pub(crate) fn records(&self) -> Vec<Employee> {
        self.state.lock().unwrap().records.clone()
    }

    fn begin(&self, op: Op, call: Call) -> Result<std::sync::MutexGuard<'_, FakeState>, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if let Some(status) = state.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            return Err(TransportError::Status { status });
        }
        Ok(state)
    }
}

#[async_trait]
impl EmployeeService for FakeEmployeeService {
    async fn get_all(&self) -> Result<Vec<Employee>, TransportError> {
        let state = self.begin(Op::GetAll, Call::GetAll)?;
        Ok(state.records.clone())
    }

    async fn get_by_key(&self, id: &PersonId) -> Result<Employee, TransportError> {
        let state = self.begin(Op::GetByKey, Call::GetByKey(id.clone()))?;
        state
            .records
            .iter()
            .find(|employee| &employee.person_id == id)
            .cloned()
            .ok_or(TransportError::Status { status: 404 })
    }

    async fn create(&self, employee: &Employee) -> Result<Employee, TransportError> {
        let mut state = self.begin(Op::Create, Call::Create(employee.clone()))?;
        state.records.push(employee.clone());
        Ok(employee.clone())
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, TransportError> {
        let mut state = self.begin(Op::Update, Call::Update(employee.clone()))?;
        let slot = state
            .records
            .iter_mut()
            .find(|existing| existing.person_id == employee.person_id)
            .ok_or(TransportError::Status { status: 404 })?;
        *slot = employee.clone();
        Ok(employee.clone())
    }

    async fn delete(&self, id: &PersonId) -> Result<(), TransportError> {
        let mut state = self.begin(Op::Delete, Call::Delete(id.clone()))?;
        state.records.retain(|employee| &employee.person_id != id);
        Ok(())
    }
}

/// Answers dialogs from a script and remembers everything it was shown.
#[derive(Default)]
pub(crate) struct ScriptedDialogs {
    answers: Mutex<VecDeque<DialogOutcome>>,
    shown: Mutex<Vec<Dialog>>,
}

impl ScriptedDialogs {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn answering(answers: impl IntoIterator<Item = DialogOutcome>) -> Arc<Self> {
        let dialogs = Self::default();
        dialogs.answers.lock().unwrap().extend(answers);
        Arc::new(dialogs)
    }

    pub(crate) fn shown(&self) -> Vec<Dialog> {
        self.shown.lock().unwrap().clone()
    }

    pub(crate) fn shown_of(&self, kind: DialogKind) -> Vec<String> {
        self.shown()
            .into_iter()
            .filter(|dialog| dialog.kind == kind)
            .map(|dialog| dialog.message)
            .collect()
    }
}

#[async_trait]
impl DialogHost for ScriptedDialogs {
    async fn present(&self, dialog: Dialog) -> DialogOutcome {
        let kind = dialog.kind;
        self.shown.lock().unwrap().push(dialog);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| kind.dismissed_outcome())
    }
}

pub(crate) fn employee(id: &str, first: &str, last: &str, status: EmployeeStatus) -> Employee {
    let stamped = Utc.with_ymd_and_hms(2020, 1, 15, 9, 0, 0).unwrap();
    Employee {
        person_id: PersonId::new(id),
        first_name: first.to_string(),
        last_name: last.to_string(),
        ssn: "111-11-1111".to_string(),
        employee_no: format!("E-{id}"),
        employment_start_date: stamped,
        employment_end_date: None,
        status,
        last_updated_by: "seed".to_string(),
        last_updated_date: stamped,
    }
}
