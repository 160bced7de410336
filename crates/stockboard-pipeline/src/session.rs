//! Per-run state shared by the product and availability phases.

use stockboard_core::{AvailabilityRecord, ProductRecord};

use crate::join::{join_manufacturer, AvailabilityIndex};
use crate::presenter::{PresentError, Presenter, STATUS_DONE, STATUS_FETCHING_AVAILABILITY};

/// Where a run is in its lifecycle.
///
/// `Idle → FetchingProducts → FetchingAvailability → Done`. There is no error
/// state: a fatal error ends the run by propagating out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    FetchingProducts,
    FetchingAvailability { in_flight: usize },
    Done,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::FetchingProducts => write!(f, "fetching products"),
            RunState::FetchingAvailability { in_flight } => {
                write!(f, "fetching availability ({in_flight} in flight)")
            }
            RunState::Done => write!(f, "done"),
        }
    }
}

/// Context owned by a single run: the product collection, the availability
/// index, the in-flight counter, and the presenter that every step refreshes.
///
/// All mutation goes through `&mut self` from the task driving the run, so
/// completions are applied one at a time.
#[derive(Debug)]
pub struct Session<P> {
    presenter: P,
    products: Vec<ProductRecord>,
    index: AvailabilityIndex,
    in_flight: usize,
    state: RunState,
}

impl<P: Presenter> Session<P> {
    #[must_use]
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            products: Vec::new(),
            index: AvailabilityIndex::default(),
            in_flight: 0,
            state: RunState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    #[must_use]
    pub fn index(&self) -> &AvailabilityIndex {
        &self.index
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<ProductRecord>, P) {
        (self.products, self.presenter)
    }

    pub(crate) fn begin_products(&mut self) {
        self.state = RunState::FetchingProducts;
    }

    /// Appends one category's records and re-renders everything collected so far.
    ///
    /// # Errors
    ///
    /// Propagates presenter failures.
    pub(crate) fn append_category(
        &mut self,
        mut records: Vec<ProductRecord>,
    ) -> Result<(), PresentError> {
        for record in &mut records {
            record.availability.clear();
        }
        self.products.append(&mut records);
        self.presenter.render(&self.products)
    }

    /// Enters the availability phase and shows the fetching status.
    ///
    /// # Errors
    ///
    /// Propagates presenter failures.
    pub(crate) fn begin_availability(&mut self) -> Result<(), PresentError> {
        self.state = RunState::FetchingAvailability { in_flight: 0 };
        self.presenter.set_status(STATUS_FETCHING_AVAILABILITY)
    }

    /// Counts one more manufacturer fetch as in flight.
    pub(crate) fn track_manufacturer(&mut self) {
        self.in_flight += 1;
        self.state = RunState::FetchingAvailability {
            in_flight: self.in_flight,
        };
    }

    /// Indexes a manufacturer's feed, joins it onto the products, re-renders
    /// the whole table, and releases one in-flight slot. Shows the done
    /// status when the last slot is released.
    ///
    /// Returns the number of products that received a value.
    ///
    /// # Errors
    ///
    /// Propagates presenter failures.
    pub(crate) fn complete_manufacturer(
        &mut self,
        manufacturer: &str,
        records: Vec<AvailabilityRecord>,
    ) -> Result<usize, PresentError> {
        let feed = self.index.insert(manufacturer, records);
        let updated = join_manufacturer(&mut self.products, manufacturer, feed);
        self.presenter.render(&self.products)?;

        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.finish()?;
        } else {
            self.state = RunState::FetchingAvailability {
                in_flight: self.in_flight,
            };
        }
        Ok(updated)
    }

    /// Marks the run done and shows the done status.
    ///
    /// # Errors
    ///
    /// Propagates presenter failures.
    pub(crate) fn finish(&mut self) -> Result<(), PresentError> {
        self.state = RunState::Done;
        self.presenter.set_status(STATUS_DONE)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
