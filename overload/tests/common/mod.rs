#![allow(dead_code)]

use lazy_static::lazy_static;
use overload::prelude::*;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

// ============================================================================
// Call Counters
// ============================================================================

lazy_static! {
    static ref HITS: Mutex<HashMap<&'static str, usize>> = Mutex::new(HashMap::new());
    static ref SERIAL: Mutex<()> = Mutex::new(());
}

/// Serializes tests that read the shared counters, and clears them.
pub fn serial() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    HITS.lock().unwrap().clear();
    guard
}

pub fn hit(name: &'static str) {
    *HITS.lock().unwrap().entry(name).or_insert(0) += 1;
}

pub fn hits(name: &'static str) -> usize {
    HITS.lock().unwrap().get(name).copied().unwrap_or(0)
}

// ============================================================================
// Test Functions
// ============================================================================

pub fn f1() {
    hit("f1");
}

pub fn f2(v: &i32) -> i32 {
    hit("f2");
    v * 2
}

pub fn f3(v: &mut i32) -> i32 {
    hit("f3");
    *v *= 2;
    *v
}

pub fn f4(v: i32) -> i32 {
    hit("f4");
    v + 2
}

#[overload]
pub fn shout(s: &str) -> String {
    hit("shout");
    s.to_uppercase()
}

// ============================================================================
// Test Functors
// ============================================================================

/// Move-only adder.
pub struct Adder;

#[overload]
impl Adder {
    fn apply(&self, l: i32, r: i32) -> i32 {
        l + r
    }
}

/// Functor with state, registered by reference.
pub struct Scale {
    pub factor: f64,
}

#[overload]
impl Scale {
    fn apply(&self, x: f64) -> f64 {
        x * self.factor
    }
}
