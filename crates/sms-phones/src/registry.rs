use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use sms_core::SmsGateway;
use tracing::{debug, info};

use crate::{Message, Phone, PhoneError};

/// Lookup and lazy creation of phones by number.
pub trait PhoneStore: Send + Sync {
    /// Existing phone for `number`, or a new empty one. Concurrent callers
    /// for the same unseen number all get the same instance.
    fn get_or_create_phone(&self, number: &str) -> Arc<Phone>;

    /// Store `message` under `destination`, creating the phone if needed.
    fn receive_inbound(&self, destination: &str, message: Message) -> Result<(), PhoneError> {
        self.get_or_create_phone(destination).store(message)
    }

    fn list_phone_numbers(&self) -> Vec<String>;

    /// Lookup without creation.
    fn get_phone(&self, number: &str) -> Result<Arc<Phone>, PhoneError>;
}

/// Process-wide phone registry. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Registry {
    phones: Arc<DashMap<String, Arc<Phone>>>,
    gateway: Arc<dyn SmsGateway>,
}

impl Registry {
    /// Phones created by this registry send through `gateway`.
    pub fn new(gateway: Arc<dyn SmsGateway>) -> Self {
        Self {
            phones: Arc::new(DashMap::new()),
            gateway,
        }
    }

    pub fn len(&self) -> usize {
        self.phones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }
}

impl PhoneStore for Registry {
    fn get_or_create_phone(&self, number: &str) -> Arc<Phone> {
        if let Some(phone) = self.phones.get(number) {
            return Arc::clone(phone.value());
        }
        // The entry holds the shard lock, so only one caller can insert.
        self.phones
            .entry(number.to_string())
            .or_insert_with(|| {
                info!(phone = number, "creating phone");
                Arc::new(Phone::new(number, Arc::clone(&self.gateway)))
            })
            .value()
            .clone()
    }

    fn list_phone_numbers(&self) -> Vec<String> {
        self.phones.iter().map(|entry| entry.key().clone()).collect()
    }

    fn get_phone(&self, number: &str) -> Result<Arc<Phone>, PhoneError> {
        debug!(phone = number, "looking up phone");
        self.phones
            .get(number)
            .map(|phone| Arc::clone(phone.value()))
            .ok_or_else(|| PhoneError::PhoneNotFound(number.to_string()))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("phones", &self.phones.len())
            .field("gateway", &self.gateway.provider())
            .finish()
    }
}
