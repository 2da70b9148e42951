//! Domain services
//!
//! Services are free async functions over a `DatabaseConnection` returning
//! `anyhow::Result`; domain failures are raised as `PlantwiseError`.

pub mod asset;
pub mod device;
pub mod library;
pub mod lock;
pub mod scene;
pub mod seed;
pub mod sensor_tag;
pub mod telemetry;
pub mod tenant;

use plantwise_persistence::sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Select};
use plantwise_persistence::{Page, PageParam};

/// Run `select` as one page of results. Callers supply the ordering.
pub(crate) async fn fetch_page<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    param: PageParam,
) -> anyhow::Result<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
{
    let page_number = param.page();
    let page_size = param.page_size();

    let paginator = select.paginate(db, page_size);
    let total_count = paginator.num_items().await?;
    if total_count == 0 {
        return Ok(Page::empty());
    }

    let page_items = paginator.fetch_page(page_number - 1).await?;

    Ok(Page::new(total_count, page_number, page_size, page_items))
}
