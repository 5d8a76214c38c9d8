/// Use cases module containing application business logic orchestration
mod enrich_inventory;

pub use enrich_inventory::EnrichInventoryUseCase;
