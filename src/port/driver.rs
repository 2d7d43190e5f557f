//! Driver registration and lifecycle.
//!
//! A host keeps a [`DriverTable`] of installed drivers. Each driver is
//! initialized once when the table is initialized, destroyed once at
//! teardown, and asked to create ports in between.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sample_app_port::port::{ChannelReplySink, DriverTable};
//! use sample_app_port::PortConfig;
//!
//! let mut table = DriverTable::with_defaults();
//! table.init_all();
//!
//! let (sink, _replies) = ChannelReplySink::new();
//! let (_ctx, _handle) = table
//!     .create_port("sample_app_port", &PortConfig::default(), Arc::new(sink))
//!     .unwrap();
//!
//! table.destroy_all();
//! ```

use std::sync::Arc;

use super::context::{PortContext, PortHandle};
use super::sink::ReplySink;
use crate::config::PortConfig;
use crate::error::{PortError, Result};

/// Name [`SampleAppPort`] is registered under.
pub const SAMPLE_APP_PORT_DRIVER: &str = "sample_app_port";

/// A port driver installed in a host.
pub trait PortDriver: Send + Sync + 'static {
    /// Name ports are created under.
    fn name(&self) -> &str;

    /// Called once when the host loads the driver.
    fn init(&self) {}

    /// Called once when the host unloads the driver.
    fn destroy(&self) {}

    /// Create a new port context.
    fn create_port(
        &self,
        config: &PortConfig,
        sink: Arc<dyn ReplySink>,
    ) -> Result<(PortContext, PortHandle)>;
}

/// Driver for the opcode request/reply port.
///
/// Holds no state; the hooks only log.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleAppPort;

impl PortDriver for SampleAppPort {
    fn name(&self) -> &str {
        SAMPLE_APP_PORT_DRIVER
    }

    fn init(&self) {
        tracing::trace!("sample_app_port init");
    }

    fn destroy(&self) {
        tracing::trace!("sample_app_port destroy");
    }

    fn create_port(
        &self,
        config: &PortConfig,
        sink: Arc<dyn ReplySink>,
    ) -> Result<(PortContext, PortHandle)> {
        let port = PortContext::new(config, sink)?;
        tracing::debug!(
            "Created port {} (mailbox capacity {})",
            config.name,
            config.mailbox_capacity
        );
        Ok(port)
    }
}

/// Lifecycle state of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Loaded,
    Initialized,
    Destroyed,
}

/// Registry of installed drivers, keyed by name.
pub struct DriverTable {
    /// Drivers in registration order.
    drivers: Vec<Box<dyn PortDriver>>,
    state: State,
}

impl DriverTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            drivers: Vec::new(),
            state: State::Loaded,
        }
    }

    /// Create a table with [`SampleAppPort`] installed.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.drivers.push(Box::new(SampleAppPort));
        table
    }

    /// Install a driver.
    ///
    /// # Errors
    ///
    /// [`PortError::DriverAlreadyRegistered`] if the name is taken.
    pub fn register<D: PortDriver>(&mut self, driver: D) -> Result<()> {
        if self.get(driver.name()).is_some() {
            return Err(PortError::DriverAlreadyRegistered(
                driver.name().to_string(),
            ));
        }
        if self.state == State::Initialized {
            driver.init();
        }
        self.drivers.push(Box::new(driver));
        Ok(())
    }

    /// Look up a driver by name.
    pub fn get(&self, name: &str) -> Option<&dyn PortDriver> {
        self.drivers
            .iter()
            .find(|d| d.name() == name)
            .map(|d| d.as_ref())
    }

    /// Names of installed drivers, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.drivers.iter().map(|d| d.name()).collect()
    }

    /// Check if `init_all` has run and `destroy_all` has not.
    pub fn is_initialized(&self) -> bool {
        self.state == State::Initialized
    }

    /// Run every driver's init hook. Only the first call has an effect.
    pub fn init_all(&mut self) {
        if self.state != State::Loaded {
            return;
        }
        for driver in &self.drivers {
            driver.init();
        }
        self.state = State::Initialized;
    }

    /// Run every driver's destroy hook in reverse order.
    ///
    /// No effect unless the table is initialized.
    pub fn destroy_all(&mut self) {
        if self.state != State::Initialized {
            return;
        }
        for driver in self.drivers.iter().rev() {
            driver.destroy();
        }
        self.state = State::Destroyed;
    }

    /// Create a port with the named driver.
    ///
    /// # Errors
    ///
    /// [`PortError::NotInitialized`] outside the init/destroy window,
    /// [`PortError::DriverNotFound`] for an unknown name, or whatever the
    /// driver returns.
    pub fn create_port(
        &self,
        name: &str,
        config: &PortConfig,
        sink: Arc<dyn ReplySink>,
    ) -> Result<(PortContext, PortHandle)> {
        if self.state != State::Initialized {
            return Err(PortError::NotInitialized);
        }
        let driver = self
            .get(name)
            .ok_or_else(|| PortError::DriverNotFound(name.to_string()))?;
        driver.create_port(config, sink)
    }
}

impl Default for DriverTable {
    fn default() -> Self {
        Self::new()
    }
}
