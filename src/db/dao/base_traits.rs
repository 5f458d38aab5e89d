pub trait HasCreatedAtColumn: sea_orm::EntityTrait {
    fn created_at_column() -> Self::Column;
    fn id_column() -> Self::Column;
}

pub trait HasIdActiveModel {
    fn set_id(&mut self, id: uuid::Uuid);
}

pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
    fn set_updated_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
}

/// Gives a new row its id and both timestamps.
pub fn stamp_new<A>(active: &mut A)
where
    A: HasIdActiveModel + TimestampedActiveModel,
{
    let now = chrono::Utc::now().fixed_offset();
    active.set_id(uuid::Uuid::new_v4());
    active.set_created_at(now);
    active.set_updated_at(now);
}
