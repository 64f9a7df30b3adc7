//! `/users` resource.

use crate::resources::Resource;

pub static USERS: Resource = Resource {
    collection: "/users",
    item: "/users/{id}",
    seed_name: "John Doe",
    list_summary: "Merr të gjithë përdoruesit",
    list_description: "Lista e përdoruesve",
    create_summary: "Shto një përdorues të ri",
    created_description: "Përdoruesi u shtua",
    update_summary: "Përditëso një përdorues",
    updated_description: "Përdoruesi u përditësua",
    delete_summary: "Fshij një përdorues",
    deleted_description: "Përdoruesi u fshi",
    id_description: "ID e përdoruesit",
    deleted_message: "Përdoruesi me id {id} u fshi.",
};
