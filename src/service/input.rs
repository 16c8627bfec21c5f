//! Operator input channel and a scripted implementation.

use std::{collections::VecDeque, io};

/// Operator input channel driving the entry and exit workflow.
pub trait InputReader {
    /// Vehicle type menu selection (`1` car, `2` bike).
    fn read_selection(&mut self) -> io::Result<i32>;

    /// Registration number typed by the operator.
    fn read_vehicle_registration_number(&mut self) -> io::Result<String>;
}

/// Replays queued answers in order; handy for scripted runs and tests.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    selections: VecDeque<i32>,
    registrations: VecDeque<String>,
}

impl ScriptedInput {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a menu selection.
    pub fn selection(mut self, selection: i32) -> Self {
        self.selections.push_back(selection);
        self
    }

    /// Queues a registration number.
    pub fn registration(mut self, reg_number: impl Into<String>) -> Self {
        self.registrations.push_back(reg_number.into());
        self
    }
}

impl InputReader for ScriptedInput {
    fn read_selection(&mut self) -> io::Result<i32> {
        self.selections
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no selection queued"))
    }

    fn read_vehicle_registration_number(&mut self) -> io::Result<String> {
        self.registrations
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no registration queued"))
    }
}
