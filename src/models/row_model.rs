use crate::geometry::RowGeometry;

/// One list row: the place name plus where the row sits in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRow {
    pub index: usize,
    pub total: usize,
    pub name: String,
}

impl PlaceRow {
    pub fn new(index: usize, total: usize, name: impl Into<String>) -> Self {
        debug_assert!(index < total, "row {index} out of range for {total} rows");
        Self {
            index,
            total,
            name: name.into(),
        }
    }

    /// Rows for every name, in order.
    pub fn from_names<I, S>(names: I) -> Vec<PlaceRow>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let total = names.len();
        names
            .into_iter()
            .enumerate()
            .map(|(index, name)| PlaceRow::new(index, total, name))
            .collect()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// Geometry for a row from its allocated size, if the row has been laid out.
pub fn allocated_geometry(width: i32, height: i32) -> Option<RowGeometry> {
    (width > 0 && height > 0).then(|| RowGeometry::new(f64::from(width), f64::from(height)))
}
