// prose-core-client/prose-muc
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use parking_lot::Mutex;

use crate::IDProvider;

/// Stanza ids for tests: `{prefix}-1`, `{prefix}-2`, … so that scripted room responses can
/// reference the request they answer.
pub struct IncrementingIDProvider {
    prefix: String,
    counter: Mutex<u32>,
}

impl IncrementingIDProvider {
    pub fn new(prefix: &str) -> Self {
        IncrementingIDProvider {
            prefix: prefix.to_string(),
            counter: Mutex::new(0),
        }
    }

    /// Starts over at `{prefix}-1`, e.g. after the join presences sent on connect.
    pub fn reset(&self) {
        *self.counter.lock() = 0;
    }

    /// The id handed out most recently, if any.
    pub fn last_id(&self) -> Option<String> {
        let counter = *self.counter.lock();
        (counter > 0).then(|| format!("{}-{}", self.prefix, counter))
    }
}

impl IDProvider for IncrementingIDProvider {
    fn new_id(&self) -> String {
        let mut counter = self.counter.lock();
        *counter += 1;
        format!("{}-{}", self.prefix, *counter)
    }
}
