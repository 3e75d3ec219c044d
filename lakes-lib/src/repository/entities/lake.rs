use std::fmt::{self, Debug, Formatter};

use getset::Getters;
use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::{
    Error, Result,
    repository::db::{Db, map_write_error},
};

/// A single lake record as stored in the catalog.
#[derive(Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct Lake {
    /// Unique display name
    name: String,
    /// Raw bytes of a JPEG or PNG image
    picture: Vec<u8>,
    description: String,
}

impl Lake {
    pub fn new(name: String, picture: Vec<u8>, description: String) -> Self {
        Self {
            name,
            picture,
            description,
        }
    }

    pub fn into_parts(self) -> (String, Vec<u8>, String) {
        (self.name, self.picture, self.description)
    }

    /// All lake names in ascending order
    pub(crate) fn list_names(db: &Db) -> Result<Vec<String>> {
        let conn = db.connect()?;
        let mut stmt = conn.prepare("SELECT name FROM lakes ORDER BY name")?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(names)
    }

    pub(crate) fn get(db: &Db, name: &str) -> Result<Self> {
        let conn = db.connect()?;

        conn.query_row(
            "SELECT picture, description FROM lakes WHERE name = ?1",
            params![name],
            |row| {
                Ok(Self {
                    name: name.into(),
                    picture: row.get(0)?,
                    description: row.get(1)?,
                })
            },
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(name.into()))
    }

    pub(crate) fn create(db: &Db, name: &str, picture: &[u8], description: &str) -> Result<()> {
        let conn = db.connect()?;

        conn.execute(
            "INSERT INTO lakes (name, picture, description) VALUES (?1, ?2, ?3)",
            params![name, picture, description],
        )
        .map_err(|e| map_write_error(e, name))?;

        debug!("Created lake: {name}");

        Ok(())
    }

    /// Rename and rewrite the record currently called `old_name`. When `picture` is
    /// `None` the stored image is left untouched.
    pub(crate) fn update(
        db: &Db,
        old_name: &str,
        new_name: &str,
        picture: Option<&[u8]>,
        description: &str,
    ) -> Result<()> {
        let conn = db.connect()?;

        let changed = match picture {
            Some(picture) => conn.execute(
                "UPDATE lakes SET name = ?1, picture = ?2, description = ?3 WHERE name = ?4",
                params![new_name, picture, description, old_name],
            ),
            None => conn.execute(
                "UPDATE lakes SET name = ?1, description = ?2 WHERE name = ?3",
                params![new_name, description, old_name],
            ),
        }
        .map_err(|e| map_write_error(e, new_name))?;

        if changed == 0 {
            return Err(Error::NotFound(old_name.into()));
        }

        debug!("Updated lake: {old_name} -> {new_name}");

        Ok(())
    }

    pub(crate) fn remove(db: &Db, name: &str) -> Result<()> {
        let conn = db.connect()?;

        let changed = conn.execute("DELETE FROM lakes WHERE name = ?1", params![name])?;
        if changed == 0 {
            return Err(Error::NotFound(name.into()));
        }

        debug!("Removed lake: {name}");

        Ok(())
    }
}

impl Debug for Lake {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lake")
            .field("name", &self.name)
            .field("picture", &format_args!("<{} bytes>", self.picture.len()))
            .field("description", &self.description)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_create_get() {
        let db = Db::temporary();

        Lake::create(&db, "Baikal", b"\x89PNG", "Deepest lake").unwrap();

        let lake = Lake::get(&db, "Baikal").unwrap();
        assert_eq!(lake.name(), "Baikal");
        assert_eq!(lake.picture(), b"\x89PNG");
        assert_eq!(lake.description(), "Deepest lake");
    }

    #[test]
    fn test_create_duplicate() {
        let db = Db::temporary();

        Lake::create(&db, "Baikal", b"first", "Deepest lake").unwrap();
        let err = Lake::create(&db, "Baikal", b"second", "Impostor").unwrap_err();

        assert!(matches!(err, Error::DuplicateName(ref name) if name == "Baikal"));

        let lake = Lake::get(&db, "Baikal").unwrap();
        assert_eq!(lake.picture(), b"first");
        assert_eq!(lake.description(), "Deepest lake");
    }

    #[test]
    fn test_list_names_sorted() {
        let db = Db::temporary();

        for name in ["Onega", "Baikal", "Ladoga", "Elton"] {
            Lake::create(&db, name, b"", "").unwrap();
        }

        assert_eq!(
            Lake::list_names(&db).unwrap(),
            vec!["Baikal", "Elton", "Ladoga", "Onega"]
        );
    }

    #[test]
    fn test_update_keeps_picture() {
        let db = Db::temporary();
        Lake::create(&db, "Baikal", b"picture", "Deepest lake").unwrap();

        Lake::update(&db, "Baikal", "Байкал", None, "Глубочайшее озеро").unwrap();

        let lake = Lake::get(&db, "Байкал").unwrap();
        assert_eq!(lake.picture(), b"picture");
        assert_eq!(lake.description(), "Глубочайшее озеро");
        assert!(matches!(
            Lake::get(&db, "Baikal"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_update_replaces_picture() {
        let db = Db::temporary();
        Lake::create(&db, "Baikal", b"old", "Deepest lake").unwrap();

        Lake::update(&db, "Baikal", "Baikal", Some(b"new".as_slice()), "Deepest lake").unwrap();

        assert_eq!(Lake::get(&db, "Baikal").unwrap().picture(), b"new");
    }

    #[test]
    fn test_update_onto_existing_name() {
        let db = Db::temporary();
        Lake::create(&db, "Baikal", b"", "one").unwrap();
        Lake::create(&db, "Ladoga", b"", "two").unwrap();

        let err = Lake::update(&db, "Ladoga", "Baikal", None, "two").unwrap_err();

        assert!(matches!(err, Error::DuplicateName(ref name) if name == "Baikal"));
        assert_eq!(Lake::get(&db, "Ladoga").unwrap().description(), "two");
    }

    #[test]
    fn test_update_missing() {
        let db = Db::temporary();

        let err = Lake::update(&db, "Baikal", "Ladoga", None, "").unwrap_err();

        assert!(matches!(err, Error::NotFound(ref name) if name == "Baikal"));
    }

    #[test]
    fn test_remove() {
        let db = Db::temporary();
        Lake::create(&db, "Baikal", b"", "").unwrap();
        Lake::create(&db, "Onega", b"", "").unwrap();

        Lake::remove(&db, "Baikal").unwrap();

        assert_eq!(Lake::list_names(&db).unwrap(), vec!["Onega"]);
        assert!(matches!(
            Lake::get(&db, "Baikal"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            Lake::remove(&db, "Baikal"),
            Err(Error::NotFound(_))
        ));
    }
}
