/// Places shown in the list, in display order.
pub const PLACES: &[&str] = &[
    "Falls Church, VA",
    "Durham, NC",
    "Boulder, CO",
    "Redwood City, CA",
    "Austin, TX",
    "Kansas City, KS",
    "Chattanooga, TN",
    "Charleston, SC",
];
