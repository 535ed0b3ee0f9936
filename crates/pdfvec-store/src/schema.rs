pub const TABLE_NAME: &str = "Documents";

pub const CREATE_DOCUMENTS: &str = "CREATE TABLE IF NOT EXISTS Documents (
    id        INTEGER PRIMARY KEY,
    filename  TEXT,
    page      INTEGER,
    text      TEXT,
    embedding TEXT
)";

pub const INSERT_DOCUMENT: &str = "INSERT INTO Documents (filename, page, text, embedding) VALUES (?1, ?2, ?3, ?4)";

pub const SELECT_DOCUMENTS: &str = "SELECT id, filename, page, text, embedding FROM Documents ORDER BY id";

pub const COUNT_DOCUMENTS: &str = "SELECT COUNT(*) FROM Documents";
