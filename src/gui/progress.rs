// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;

pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    tried: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, tried: 0, total: 0 }
    }
    fn set_status(&self, msg: impl Into<String>) {
        *super::lock(&self.status) = msg.into();
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn attempt_done(&mut self, _url: &str, ok: bool) {
        self.tried += 1;
        if !ok { self.set_status(format!("Source {}/{} failed", self.tried, self.total)); }
    }
    fn finish(&mut self) {
        self.set_status(format!("Fetch done ({}/{} tried)", self.tried, self.total));
    }
}
