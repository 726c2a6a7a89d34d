//! Parcel tracking use-case service.
//!
//! # Responsibility
//! - Register parcels with a creation timestamp taken from the clock.
//! - Advance parcels along `registered -> sent -> delivered`.
//! - Delegate address changes and deletion to the repository guards.
//!
//! # Invariants
//! - Service APIs never bypass repository status guards.
//! - Service layer remains storage-agnostic.

use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Service error for parcel use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Target parcel does not exist.
    NotFound(ParcelNumber),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Current time could not be rendered as RFC3339.
    Clock(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Clock(message) => write!(f, "clock error: {message}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotFound(_) | Self::Clock(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for parcel tracking.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel created now.
    ///
    /// # Contract
    /// - Status is `registered`.
    /// - `created_at` is RFC3339 UTC with whole seconds.
    /// - Returns the stored parcel including its assigned number.
    pub fn register(
        &self,
        client: ClientId,
        address: impl Into<String>,
    ) -> Result<Parcel, ServiceError> {
        let created_at = now_rfc3339()?;
        self.register_at(client, address, created_at)
    }

    /// Registers a new parcel with a caller-provided creation timestamp.
    pub fn register_at(
        &self,
        client: ClientId,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Result<Parcel, ServiceError> {
        let parcel = Parcel::new(client, address, created_at);
        let number = self.repo.add(&parcel)?;
        let parcel = parcel.with_number(number);

        info!(
            "event=parcel_register module=service status=ok number={} client={}",
            parcel.number, parcel.client
        );
        Ok(parcel)
    }

    /// Returns one parcel, mapping the storage no-rows signal to `NotFound`.
    pub fn parcel(&self, number: ParcelNumber) -> Result<Parcel, ServiceError> {
        self.repo.get(number).map_err(|err| {
            if err.is_not_found() {
                ServiceError::NotFound(number)
            } else {
                ServiceError::Repo(err)
            }
        })
    }

    /// Returns every parcel owned by `client`.
    pub fn client_parcels(&self, client: ClientId) -> Result<Vec<Parcel>, ServiceError> {
        Ok(self.repo.get_by_client(client)?)
    }

    /// Moves a parcel one step forward.
    ///
    /// Returns the new status, or `None` when the parcel is already delivered
    /// or carries a status outside the known lifecycle.
    pub fn next_status(&self, number: ParcelNumber) -> Result<Option<ParcelStatus>, ServiceError> {
        let parcel = self.parcel(number)?;
        let Some(next) = parcel.status.next() else {
            warn!(
                "event=parcel_next_status module=service status=skipped number={} current={}",
                number, parcel.status
            );
            return Ok(None);
        };

        self.repo.set_status(number, next.as_str())?;
        info!(
            "event=parcel_next_status module=service status=ok number={} from={} to={}",
            number, parcel.status, next
        );
        Ok(Some(next))
    }

    /// Changes the delivery address of a registered parcel.
    ///
    /// Silently leaves non-registered or missing parcels untouched.
    pub fn change_address(
        &self,
        number: ParcelNumber,
        address: &str,
    ) -> Result<(), ServiceError> {
        Ok(self.repo.set_address(number, address)?)
    }

    /// Deletes a registered parcel.
    ///
    /// Silently leaves non-registered or missing parcels untouched.
    pub fn delete(&self, number: ParcelNumber) -> Result<(), ServiceError> {
        Ok(self.repo.delete(number)?)
    }
}

fn now_rfc3339() -> Result<String, ServiceError> {
    OffsetDateTime::now_utc()
        .replace_nanosecond(0)
        .map_err(|err| ServiceError::Clock(err.to_string()))?
        .format(&Rfc3339)
        .map_err(|err| ServiceError::Clock(err.to_string()))
}
