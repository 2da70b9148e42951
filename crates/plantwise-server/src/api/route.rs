use actix_web::{Scope, web};

use super::{asset, client, device, library, plant, scene, sensor_tag, telemetry};

pub fn tenant_routes() -> Scope {
    web::scope("/tenants")
        .service(client::routes())
        .service(plant::routes())
}

pub fn library_routes() -> Scope {
    web::scope("/library").service(library::routes())
}

pub fn device_routes() -> Scope {
    web::scope("/devices")
        .service(telemetry::ingest)
        .service(device::routes())
}

pub fn asset_routes() -> Scope {
    web::scope("/assets")
        .service(scene::save_scene)
        .service(sensor_tag::routes())
        .service(asset::routes())
}

/// All API scopes mounted under `context_path`
pub fn routes(context_path: &str) -> Scope {
    web::scope(context_path)
        .service(tenant_routes())
        .service(library_routes())
        .service(device_routes())
        .service(asset_routes())
}
