diesel::table! {
    containers (id) {
        id -> Text,
        name -> Text,
    }
}

diesel::table! {
    contacts (id) {
        id -> Text,
        containerId -> Text,
        fullName -> Nullable<Text>,
        emailAddresses -> Text,
        image -> Nullable<Binary>,
        thumbnail -> Nullable<Binary>,
    }
}
