use crate::logging_driver::DriverOp;
use std::sync::{Arc, Mutex};
use tablet::{
    driver::{Operation, Response},
    stmt::Statement,
    Result,
};

/// A wrapper around the operations log that provides a clean API for tests
#[derive(Clone)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Operation) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(&op.operation))
            .count()
    }

    pub fn inserts(&self) -> usize {
        self.count(|op| matches!(op, Operation::Statement(Statement::Insert(_))))
    }

    pub fn updates(&self) -> usize {
        self.count(|op| matches!(op, Operation::Statement(Statement::Update(_))))
    }

    pub fn deletes(&self) -> usize {
        self.count(|op| matches!(op, Operation::Statement(Statement::Delete(_))))
    }

    pub fn selects(&self) -> usize {
        self.count(|op| matches!(op, Operation::Statement(Statement::Select(_))))
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the first operation from the log
    pub fn pop(&self) -> Option<(Operation, Result<Response>)> {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            None
        } else {
            let op = ops.remove(0);
            Some((op.operation, op.response))
        }
    }
}
