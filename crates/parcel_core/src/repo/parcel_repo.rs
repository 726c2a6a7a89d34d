//! Parcel repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate parcel operations into row operations on the `parcel` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Address changes and deletes only touch rows with `status = 'registered'`.
//! - Writes that affect zero rows succeed; callers re-read to confirm.
//! - A missing row on `get` surfaces as the driver's no-rows error.
//! - Reads fail with `InvalidData` on the first undecodable row.

use crate::db::DbError;
use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use log::{debug, error};
use rusqlite::types::FromSql;
use rusqlite::{named_params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PARCEL_TABLE: &str = "parcel";
const PARCEL_COLUMNS: &[&str] = &["number", "client", "status", "address", "created_at"];

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcel";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for parcel persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Whether a single-row read matched nothing.
    ///
    /// The store does not map this to a domain error, so this is the one
    /// place callers should use to recognise "does not exist".
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Db(err) => err.is_no_rows(),
            _ => false,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted parcel data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for parcel records.
pub trait ParcelRepository {
    /// Inserts a parcel and returns the storage-assigned number.
    ///
    /// `parcel.number` is ignored.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    /// Reads exactly one parcel. See [`RepoError::is_not_found`].
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Reads every parcel owned by `client`, empty when none.
    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>>;
    /// Overwrites status unconditionally.
    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()>;
    /// Overwrites address while the parcel is still registered.
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    /// Removes the parcel while it is still registered.
    fn delete(&self, number: ParcelNumber) -> RepoResult<()>;
}

/// SQLite-backed parcel store over a caller-owned connection.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    /// Borrows an open connection without inspecting it.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Borrows an open connection after checking the `parcel` table shape.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when `parcel` does not exist.
    /// - `MissingRequiredColumn` for the first absent column.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_parcel_schema(conn)?;
        Ok(Self::new(conn))
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        let result = self
            .conn
            .execute(
                "INSERT INTO parcel (client, status, address, created_at)
                 VALUES (:client, :status, :address, :created_at);",
                named_params! {
                    ":client": parcel.client,
                    ":status": parcel.status.as_str(),
                    ":address": parcel.address.as_str(),
                    ":created_at": parcel.created_at.as_str(),
                },
            )
            .map(|_| self.conn.last_insert_rowid())
            .map_err(RepoError::from);

        if let Ok(number) = &result {
            debug!(
                "event=parcel_add module=repo status=ok number={} client={}",
                number, parcel.client
            );
        }
        logged("parcel_add", result)
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        let result = self.conn.query_row_and_then(
            &format!("{PARCEL_SELECT_SQL} WHERE number = :number;"),
            named_params! { ":number": number },
            parse_parcel_row,
        );

        if let Err(err) = &result {
            if err.is_not_found() {
                debug!("event=parcel_get module=repo status=not_found number={number}");
                return result;
            }
        }
        logged("parcel_get", result)
    }

    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        logged("parcel_get_by_client", self.query_by_client(client))
    }

    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()> {
        let result = self.conn.execute(
            "UPDATE parcel SET status = :status WHERE number = :number;",
            named_params! {
                ":status": status,
                ":number": number,
            },
        );
        logged("parcel_set_status", affected("parcel_set_status", number, result))
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let result = self.conn.execute(
            "UPDATE parcel SET address = :address
             WHERE number = :number AND status = :status;",
            named_params! {
                ":address": address,
                ":number": number,
                ":status": ParcelStatus::Registered.as_str(),
            },
        );
        logged("parcel_set_address", affected("parcel_set_address", number, result))
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        let result = self.conn.execute(
            "DELETE FROM parcel WHERE number = :number AND status = :status;",
            named_params! {
                ":number": number,
                ":status": ParcelStatus::Registered.as_str(),
            },
        );
        logged("parcel_delete", affected("parcel_delete", number, result))
    }
}

impl SqliteParcelRepository<'_> {
    fn query_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE client = :client;"))?;
        let mut rows = stmt.query(named_params! { ":client": client })?;
        let mut parcels = Vec::new();

        while let Some(row) = rows.next()? {
            parcels.push(parse_parcel_row(row)?);
        }

        debug!(
            "event=parcel_get_by_client module=repo status=ok client={} count={}",
            client,
            parcels.len()
        );
        Ok(parcels)
    }
}

fn parse_parcel_row(row: &Row<'_>) -> RepoResult<Parcel> {
    let status: String = column(row, "status")?;
    Ok(Parcel {
        number: column(row, "number")?,
        client: column(row, "client")?,
        status: ParcelStatus::from(status),
        address: column(row, "address")?,
        created_at: column(row, "created_at")?,
    })
}

fn column<T: FromSql>(row: &Row<'_>, name: &'static str) -> RepoResult<T> {
    row.get(name).map_err(|err| match err {
        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => {
            RepoError::InvalidData(format!("parcel.{name}: {err}"))
        }
        other => RepoError::from(other),
    })
}

fn affected(
    event: &'static str,
    number: ParcelNumber,
    result: rusqlite::Result<usize>,
) -> RepoResult<()> {
    let changed = result?;
    debug!("event={event} module=repo status=ok number={number} affected={changed}");
    Ok(())
}

fn logged<T>(event: &'static str, result: RepoResult<T>) -> RepoResult<T> {
    if let Err(err) = &result {
        error!("event={event} module=repo status=error error={err}");
    }
    result
}

fn ensure_parcel_schema(conn: &Connection) -> RepoResult<()> {
    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = :name
        );",
        named_params! { ":name": PARCEL_TABLE },
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(PARCEL_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(:name);")?;
    let present = stmt
        .query_map(named_params! { ":name": PARCEL_TABLE }, |row| {
            row.get::<_, String>(0)
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    for &column in PARCEL_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: PARCEL_TABLE,
                column,
            });
        }
    }

    Ok(())
}
