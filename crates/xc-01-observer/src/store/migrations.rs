//! Fund migration records, one per chain

use crate::domain::FundMigrationRecord;
use crate::error::ObserverResult;
use crate::keys;
use shared_types::{ChainId, KeyValueStore, RecordStore};

pub fn get_fund_migration<S: KeyValueStore + ?Sized>(
    store: &S,
    chain_id: ChainId,
) -> ObserverResult<Option<FundMigrationRecord>> {
    Ok(store.get_record(&keys::fund_migration_key(chain_id))?)
}

pub fn set_fund_migration<S: KeyValueStore + ?Sized>(
    store: &mut S,
    record: &FundMigrationRecord,
) -> ObserverResult<()> {
    store.put_record(&keys::fund_migration_key(record.chain_id), record)?;
    Ok(())
}

pub fn remove_fund_migration<S: KeyValueStore + ?Sized>(
    store: &mut S,
    chain_id: ChainId,
) -> ObserverResult<()> {
    store.delete_record(&keys::fund_migration_key(chain_id))?;
    Ok(())
}

pub fn list_fund_migrations<S: KeyValueStore + ?Sized>(
    store: &S,
) -> ObserverResult<Vec<FundMigrationRecord>> {
    Ok(store.scan_records(keys::KeyPrefix::FundMigration.as_bytes())?)
}
