// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;

use crate::TimeProvider;

/// A clock that only moves when told to.
pub struct ConstantTimeProvider {
    now: Mutex<DateTime<Utc>>,
}

impl ConstantTimeProvider {
    pub fn new(now: DateTime<Utc>) -> Self {
        ConstantTimeProvider {
            now: Mutex::new(now),
        }
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self::new(Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap())
    }

    pub fn set_now(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, duration: Duration) {
        *self.now.lock() += chrono::Duration::from_std(duration).unwrap();
    }
}

impl TimeProvider for ConstantTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
