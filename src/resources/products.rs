//! `/products` resource.

use crate::resources::Resource;

pub static PRODUCTS: Resource = Resource {
    collection: "/products",
    item: "/products/{id}",
    seed_name: "Lapsi",
    list_summary: "Merr të gjithë produktet",
    list_description: "Lista e produkteve",
    create_summary: "Shto një produkt të ri",
    created_description: "Produkti u shtua",
    update_summary: "Përditëso një produkt",
    updated_description: "Produkti u përditësua",
    delete_summary: "Fshij një produkt",
    deleted_description: "Produkti u fshi",
    id_description: "ID e produktit",
    deleted_message: "Produkti me id {id} u fshi.",
};
