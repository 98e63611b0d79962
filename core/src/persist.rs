use crate::config::Config;
use crate::error::{Error, Result};
use crate::index::{Document, IndexEntry, ID_SEPARATOR};
use crate::store::{IndexReader, IndexWriter};
use sled::transaction::{abort, ConflictableTransactionResult, TransactionError};
use sled::{Db, Transactional, Tree};

/// Document and index tables kept in one sled database.
///
/// Each table is a sled tree named after the configuration. The index table
/// has a secondary tree, `<index_table>.word`, whose keys are
/// `word ␟ entry_id` so all entries of a word share a scan prefix.
#[derive(Clone)]
pub struct SledStore {
    db: Db,
    document_table: String,
    index_table: String,
    word_index: String,
}

impl SledStore {
    /// Open (or create) the database described by `config`, creating any
    /// missing table.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        let path = config.database_path();
        let db = sled::open(&path)?;
        let store = Self {
            db,
            document_table: config.tables.document_table.clone(),
            index_table: config.tables.index_table.clone(),
            word_index: config.word_index(),
        };
        store.create_tables()?;
        tracing::debug!(path = %path.display(), "opened store");
        Ok(store)
    }

    fn create_tables(&self) -> Result<()> {
        for name in [&self.document_table, &self.index_table, &self.word_index] {
            self.db.open_tree(name)?;
        }
        Ok(())
    }

    /// Drop both tables and the word index, then recreate them empty.
    pub fn rebuild(&self) -> Result<()> {
        for name in [&self.document_table, &self.index_table, &self.word_index] {
            self.db.drop_tree(name.as_bytes())?;
        }
        self.create_tables()?;
        tracing::info!(
            document_table = %self.document_table,
            index_table = %self.index_table,
            "rebuilt database"
        );
        Ok(())
    }

    /// Remove the secondary index on `word`. Lookups fail until `rebuild`.
    pub fn drop_word_index(&self) -> Result<bool> { Ok(self.db.drop_tree(self.word_index.as_bytes())?) }

    /// Names of the tables that currently exist, in creation order.
    pub fn tables(&self) -> Vec<String> {
        let names = self.db.tree_names();
        [&self.document_table, &self.index_table, &self.word_index]
            .into_iter()
            .filter(|name| names.iter().any(|n| &n[..] == name.as_bytes()))
            .cloned()
            .collect()
    }

    pub fn document_count(&self) -> Result<usize> { Ok(self.table(&self.document_table)?.len()) }

    pub fn entry_count(&self) -> Result<usize> { Ok(self.table(&self.index_table)?.len()) }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Handle to an existing table. Unlike `Db::open_tree` this never
    /// creates the tree.
    fn table(&self, name: &str) -> Result<Tree> {
        let exists = self.db.tree_names().iter().any(|n| &n[..] == name.as_bytes());
        if !exists {
            return Err(Error::Query(format!("table `{name}` does not exist")));
        }
        Ok(self.db.open_tree(name)?)
    }
}

fn word_prefix(word: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(word.len() + 1);
    key.extend_from_slice(word.as_bytes());
    let mut sep = [0u8; 4];
    key.extend_from_slice(ID_SEPARATOR.encode_utf8(&mut sep).as_bytes());
    key
}

fn word_key(entry: &IndexEntry) -> Vec<u8> {
    let mut key = word_prefix(&entry.word);
    key.extend_from_slice(entry.id.as_bytes());
    key
}

fn validate_document_id(id: &str) -> Result<()> {
    if id.is_empty() || id.contains(ID_SEPARATOR) {
        return Err(Error::InvalidDocumentId(id.to_string()));
    }
    Ok(())
}

impl IndexWriter for SledStore {
    fn put_document(&self, doc: &Document) -> Result<()> {
        validate_document_id(&doc.id)?;
        let documents = self.table(&self.document_table)?;
        let value = bincode::serialize(doc)?;
        documents
            .compare_and_swap(doc.id.as_bytes(), None::<&[u8]>, Some(value))?
            .map_err(|_| Error::DuplicateKey(doc.id.clone()))
    }

    fn backfill_content(&self, document_id: &str, content: &str) -> Result<()> {
        let documents = self.table(&self.document_table)?;
        loop {
            let current = documents
                .get(document_id.as_bytes())?
                .ok_or_else(|| Error::NotFound(document_id.to_string()))?;
            let mut doc: Document = bincode::deserialize(&current)?;
            doc.content = content.to_string();
            let updated = bincode::serialize(&doc)?;
            if documents.compare_and_swap(document_id.as_bytes(), Some(&current), Some(updated))?.is_ok() {
                return Ok(());
            }
        }
    }

    fn put_index(&self, entry: &IndexEntry) -> Result<()> { self.batch_put_index(std::slice::from_ref(entry)) }

    fn batch_put_index(&self, entries: &[IndexEntry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let index = self.table(&self.index_table)?;
        let words = self.table(&self.word_index)?;
        let rows = entries
            .iter()
            .map(|entry| -> Result<_> { Ok((entry, bincode::serialize(entry)?)) })
            .collect::<Result<Vec<_>>>()?;

        (&index, &words)
            .transaction(|(index, words)| -> ConflictableTransactionResult<(), Error> {
                for (entry, value) in &rows {
                    // Reads inside the transaction see its own writes, so a
                    // repeated id within the batch collides too.
                    if index.get(entry.id.as_bytes())?.is_some() {
                        return abort(Error::DuplicateKey(entry.id.clone()));
                    }
                    index.insert(entry.id.as_bytes(), value.as_slice())?;
                    words.insert(word_key(entry), Vec::<u8>::new())?;
                }
                Ok(())
            })
            .map_err(|err| match err {
                TransactionError::Abort(e) => e,
                TransactionError::Storage(e) => Error::Storage(e),
            })?;
        tracing::debug!(entries = entries.len(), "wrote index entries");
        Ok(())
    }
}

impl IndexReader for SledStore {
    fn get_document(&self, id: &str) -> Result<Option<Document>> {
        let documents = self.table(&self.document_table)?;
        match documents.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn entries_by_words(&self, words: &[&str]) -> Result<Vec<IndexEntry>> {
        let word_index = self.table(&self.word_index)?;
        let index = self.table(&self.index_table)?;
        let mut entries = Vec::new();
        for word in words {
            let prefix = word_prefix(word);
            for item in word_index.scan_prefix(&prefix) {
                let (key, _) = item?;
                let id = &key[prefix.len()..];
                match index.get(id)? {
                    Some(bytes) => entries.push(bincode::deserialize(&bytes)?),
                    None => tracing::warn!(word, id = %String::from_utf8_lossy(id), "dangling word index key"),
                }
            }
        }
        Ok(entries)
    }
}
