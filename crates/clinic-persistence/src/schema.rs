// Esquema Diesel de la clínica. Mismo layout para SQLite y Postgres.
// Tablas: people, pets, vets, appointments
diesel::table! {
    people (id) {
        id -> Integer,
        name -> Text,
        email -> Nullable<Text>,
        phone -> Nullable<Text>,
    }
}
diesel::table! {
    pets (id) {
        id -> Integer,
        name -> Text,
        species -> Text,
        breed -> Nullable<Text>,
        person_id -> Integer,
    }
}
diesel::table! {
    vets (id) {
        id -> Integer,
        crmv -> Text,
        specialty -> Text,
    }
}
diesel::table! {
    appointments (id) {
        id -> Integer,
        date -> Timestamp,
        reason -> Nullable<Text>,
        pet_id -> Integer,
        vet_id -> Integer,
    }
}
diesel::joinable!(pets -> people (person_id));
diesel::joinable!(appointments -> pets (pet_id));
diesel::joinable!(appointments -> vets (vet_id));
diesel::allow_tables_to_appear_in_same_query!(people, pets, vets, appointments);
