diesel::table! {
    bookings (id) {
        id -> Uuid,
        club_email -> Text,
        space -> Text,
        booking_date -> Date,
        start_hour -> Int2,
    }
}

diesel::table! {
    clubs (email) {
        email -> Text,
        name -> Text,
    }
}

diesel::table! {
    spaces (name) {
        name -> Text,
    }
}

diesel::joinable!(bookings -> clubs (club_email));
diesel::joinable!(bookings -> spaces (space));

diesel::allow_tables_to_appear_in_same_query!(bookings, clubs, spaces);
