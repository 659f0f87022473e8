//! RocksDB-backed key-value/document backend
//!
//! Column families:
//! - `users`: big-endian user key -> bincode resume document
//! - `follows`: follower key ++ followee key -> empty
//! - `skills`: skill name ++ 0x00 ++ user key -> empty
//!
//! There are no secondary traversal structures: every analytic query is
//! answered by scanning these families, the way a document store without a
//! graph engine would.

use super::{BulkLoader, QueryBackend};
use crate::error::{LoaderError, LoaderResult, QueryError, QueryResult};
use crate::graph::{Follow, GraphError, GraphStats, Skill, User, UserKey};
use crate::query::{AnalyticQuery, InfluenceRow, QueryKind, QueryOutput, ResumeFilter};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Direction, IteratorMode, Options, WriteBatch, DB};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

const CF_USERS: &str = "users";
const CF_FOLLOWS: &str = "follows";
const CF_SKILLS: &str = "skills";
/// Lives in the default column family while a snapshot is sealed
const SEALED_KEY: &[u8] = b"meta:sealed";
/// Deletes buffered per write batch while purging
const PURGE_CHUNK: usize = 4_096;

/// Errors raised by the RocksDB layer
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("RocksDB error: {0}")]
    RocksDb(#[from] rocksdb::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Column family error: {0}")]
    ColumnFamily(String),

    #[error("Corrupt key in {0}")]
    CorruptKey(&'static str),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for LoaderError {
    fn from(err: StorageError) -> Self {
        LoaderError::Storage(err.to_string())
    }
}

impl From<StorageError> for QueryError {
    fn from(err: StorageError) -> Self {
        QueryError::Storage(err.to_string())
    }
}

/// Persistent backend over a RocksDB directory
pub struct RocksBackend {
    db: Arc<DB>,
    /// Serializes validate-then-write sequences of concurrent batches
    write_lock: Mutex<()>,
}

impl RocksBackend {
    /// Open or create a database at `path`
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        info!("Opening RocksDB backend at: {}", path.display());

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(64 * 1024 * 1024);
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);

        let cf_descriptors = vec![
            ColumnFamilyDescriptor::new("default", Options::default()),
            ColumnFamilyDescriptor::new(CF_USERS, Self::cf_options()),
            ColumnFamilyDescriptor::new(CF_FOLLOWS, Self::cf_options()),
            ColumnFamilyDescriptor::new(CF_SKILLS, Self::cf_options()),
        ];
        let db = DB::open_cf_descriptors(&opts, path, cf_descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    fn cf_options() -> Options {
        let mut opts = Options::default();
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
        opts
    }

    fn cf(&self, name: &str) -> StorageResult<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamily(name.to_string()))
    }

    fn user_key(key: UserKey) -> [u8; 8] {
        key.as_u64().to_be_bytes()
    }

    fn follow_key(follower: UserKey, followee: UserKey) -> [u8; 16] {
        let mut buf = [0u8; 16];
        buf[..8].copy_from_slice(&follower.as_u64().to_be_bytes());
        buf[8..].copy_from_slice(&followee.as_u64().to_be_bytes());
        buf
    }

    fn skill_key(skill: &Skill, key: UserKey) -> Vec<u8> {
        let mut buf = Vec::with_capacity(skill.as_str().len() + 9);
        buf.extend_from_slice(skill.as_str().as_bytes());
        buf.push(0);
        buf.extend_from_slice(&key.as_u64().to_be_bytes());
        buf
    }

    fn decode_key(bytes: &[u8]) -> StorageResult<UserKey> {
        let raw: [u8; 8] = bytes.try_into().map_err(|_| StorageError::CorruptKey(CF_USERS))?;
        Ok(UserKey::new(u64::from_be_bytes(raw)))
    }

    fn decode_follow(bytes: &[u8]) -> StorageResult<Follow> {
        if bytes.len() != 16 {
            return Err(StorageError::CorruptKey(CF_FOLLOWS));
        }
        Ok(Follow {
            follower: Self::decode_key(&bytes[..8])?,
            followee: Self::decode_key(&bytes[8..])?,
        })
    }

    fn decode_skill(bytes: &[u8]) -> StorageResult<Skill> {
        // the trailing user key may itself contain zero bytes
        let split = bytes
            .len()
            .checked_sub(9)
            .filter(|&pos| bytes[pos] == 0)
            .ok_or(StorageError::CorruptKey(CF_SKILLS))?;
        let name = std::str::from_utf8(&bytes[..split]).map_err(|_| StorageError::CorruptKey(CF_SKILLS))?;
        Ok(Skill::new(name))
    }

    fn has_user(&self, key: UserKey) -> StorageResult<bool> {
        Ok(self.db.get_cf(self.cf(CF_USERS)?, Self::user_key(key))?.is_some())
    }

    fn get_user(&self, key: UserKey) -> StorageResult<Option<User>> {
        match self.db.get_cf(self.cf(CF_USERS)?, Self::user_key(key))? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }

    fn has_follow(&self, follower: UserKey, followee: UserKey) -> StorageResult<bool> {
        Ok(self
            .db
            .get_cf(self.cf(CF_FOLLOWS)?, Self::follow_key(follower, followee))?
            .is_some())
    }

    fn is_sealed(&self) -> StorageResult<bool> {
        Ok(self.db.get(SEALED_KEY)?.is_some())
    }

    /// Every key in a column family
    fn scan_keys(&self, name: &str) -> StorageResult<Vec<Box<[u8]>>> {
        let cf = self.cf(name)?;
        let mut keys = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (key, _) = item?;
            keys.push(key);
        }
        Ok(keys)
    }

    /// Every follow edge, ordered by follower then followee
    fn scan_follows(&self) -> StorageResult<Vec<Follow>> {
        self.scan_keys(CF_FOLLOWS)?
            .iter()
            .map(|k| Self::decode_follow(k))
            .collect()
    }

    /// Users followed by `follower`, via a prefix scan
    fn scan_followees(&self, follower: UserKey) -> StorageResult<Vec<UserKey>> {
        let cf = self.cf(CF_FOLLOWS)?;
        let prefix = Self::user_key(follower);
        let mut followees = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::From(&prefix, Direction::Forward)) {
            let (key, _) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            followees.push(Self::decode_follow(&key)?.followee);
        }
        Ok(followees)
    }

    fn scan_users(&self) -> StorageResult<Vec<User>> {
        let cf = self.cf(CF_USERS)?;
        let mut users = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_, value) = item?;
            users.push(bincode::deserialize(&value)?);
        }
        Ok(users)
    }

    /// Delete every key of a column family, flushing in fixed-size batches
    fn purge_family(&self, name: &str) -> StorageResult<()> {
        let cf = self.cf(name)?;
        let mut batch = WriteBatch::default();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (key, _) = item?;
            batch.delete_cf(cf, key);
            if batch.len() >= PURGE_CHUNK {
                self.db.write(std::mem::take(&mut batch))?;
            }
        }
        if !batch.is_empty() {
            self.db.write(batch)?;
        }
        Ok(())
    }

    fn count_keys(&self, name: &str) -> StorageResult<usize> {
        let cf = self.cf(name)?;
        let mut count = 0;
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            item?;
            count += 1;
        }
        Ok(count)
    }

    fn stats(&self) -> StorageResult<GraphStats> {
        Ok(GraphStats {
            users: self.count_keys(CF_USERS)?,
            follows: self.count_keys(CF_FOLLOWS)?,
        })
    }

    fn skill_counts(&self) -> StorageResult<BTreeMap<Skill, u64>> {
        let mut counts = BTreeMap::new();
        for key in self.scan_keys(CF_SKILLS)? {
            *counts.entry(Self::decode_skill(&key)?).or_insert(0u64) += 1;
        }
        Ok(counts)
    }

    fn friends_of_friends(&self, user: UserKey) -> StorageResult<BTreeSet<UserKey>> {
        let direct: FxHashSet<UserKey> = self.scan_followees(user)?.into_iter().collect();
        let mut suggestions = BTreeSet::new();
        for middle in &direct {
            for candidate in self.scan_followees(*middle)? {
                if candidate != user && !direct.contains(&candidate) {
                    suggestions.insert(candidate);
                }
            }
        }
        Ok(suggestions)
    }

    fn influential_followers(&self, min_followers: usize) -> StorageResult<Vec<InfluenceRow>> {
        let follows = self.scan_follows()?;

        let mut in_degree: FxHashMap<UserKey, usize> = FxHashMap::default();
        for edge in &follows {
            *in_degree.entry(edge.followee).or_default() += 1;
        }

        let mut influential: FxHashMap<UserKey, usize> = FxHashMap::default();
        for edge in &follows {
            if in_degree.get(&edge.follower).copied().unwrap_or(0) >= min_followers {
                *influential.entry(edge.followee).or_default() += 1;
            }
        }

        let mut rows: Vec<InfluenceRow> = influential
            .into_iter()
            .filter(|&(_, count)| count > 0 && count >= min_followers)
            .map(|(user, influential_followers)| InfluenceRow {
                user,
                influential_followers,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.influential_followers
                .cmp(&a.influential_followers)
                .then(a.user.cmp(&b.user))
        });
        Ok(rows)
    }

    fn followers_of(&self, user: UserKey) -> StorageResult<Vec<UserKey>> {
        // keys are follower-major, so collecting in scan order keeps them ascending
        Ok(self
            .scan_follows()?
            .into_iter()
            .filter(|edge| edge.followee == user)
            .map(|edge| edge.follower)
            .collect())
    }

    fn count_resumes(&self, filter: &ResumeFilter) -> StorageResult<u64> {
        Ok(self.scan_users()?.iter().filter(|u| filter.matches(u)).count() as u64)
    }

    fn require_user(&self, user: UserKey) -> QueryResult<()> {
        if self.has_user(user)? {
            Ok(())
        } else {
            Err(QueryError::UnknownUser(user))
        }
    }
}

#[async_trait]
impl BulkLoader for RocksBackend {
    async fn purge_all(&self) -> LoaderResult<GraphStats> {
        let _guard = self.write_lock.lock().await;
        let removed = self.stats()?;

        // unseal first so an interrupted purge never leaves a sealed partial graph
        self.db.delete(SEALED_KEY).map_err(StorageError::from)?;
        for name in [CF_USERS, CF_FOLLOWS, CF_SKILLS] {
            self.purge_family(name)?;
        }

        debug!("Purged {} users and {} follows", removed.users, removed.follows);
        Ok(removed)
    }

    async fn load_vertices(&self, batch: &[User]) -> LoaderResult<usize> {
        let _guard = self.write_lock.lock().await;

        let mut batch_keys = FxHashSet::default();
        for user in batch {
            if !batch_keys.insert(user.key) || self.has_user(user.key)? {
                return Err(LoaderError::Rejected(GraphError::DuplicateUser(user.key)));
            }
        }

        let users = self.cf(CF_USERS)?;
        let skills = self.cf(CF_SKILLS)?;
        let mut write = WriteBatch::default();
        for user in batch {
            let value = bincode::serialize(user).map_err(StorageError::from)?;
            write.put_cf(users, Self::user_key(user.key), value);
            for skill in &user.skills {
                write.put_cf(skills, Self::skill_key(skill, user.key), b"");
            }
        }
        write.delete(SEALED_KEY);
        self.db.write(write).map_err(StorageError::from)?;
        Ok(batch.len())
    }

    async fn load_edges(&self, batch: &[Follow]) -> LoaderResult<usize> {
        let _guard = self.write_lock.lock().await;

        let mut batch_pairs = FxHashSet::default();
        for edge in batch {
            if edge.follower == edge.followee {
                return Err(LoaderError::Rejected(GraphError::SelfLoop(edge.follower)));
            }
            for endpoint in [edge.follower, edge.followee] {
                if !self.has_user(endpoint)? {
                    return Err(LoaderError::Rejected(GraphError::UnknownEndpoint(endpoint)));
                }
            }
            if !batch_pairs.insert(edge.as_pair()) || self.has_follow(edge.follower, edge.followee)? {
                return Err(LoaderError::Rejected(GraphError::DuplicateFollow(
                    edge.follower,
                    edge.followee,
                )));
            }
        }

        let follows = self.cf(CF_FOLLOWS)?;
        let mut write = WriteBatch::default();
        for edge in batch {
            write.put_cf(follows, Self::follow_key(edge.follower, edge.followee), b"");
        }
        write.delete(SEALED_KEY);
        self.db.write(write).map_err(StorageError::from)?;
        Ok(batch.len())
    }

    async fn seal(&self) -> LoaderResult<()> {
        let _guard = self.write_lock.lock().await;
        self.db.put(SEALED_KEY, b"").map_err(StorageError::from)?;
        Ok(())
    }
}

#[async_trait]
impl QueryBackend for RocksBackend {
    fn name(&self) -> &str {
        "rocksdb"
    }

    fn supports(&self, _kind: QueryKind) -> bool {
        true
    }

    async fn run_query(&self, query: &AnalyticQuery) -> QueryResult<QueryOutput> {
        if !self.is_sealed()? {
            return Err(QueryError::GraphNotLoaded);
        }

        let output = match query {
            AnalyticQuery::SkillCounts => QueryOutput::SkillCounts(self.skill_counts()?),
            AnalyticQuery::FriendsOfFriends { user } => {
                self.require_user(*user)?;
                QueryOutput::FriendsOfFriends(self.friends_of_friends(*user)?)
            }
            AnalyticQuery::InfluentialFollowers { min_followers } => {
                QueryOutput::InfluentialFollowers(self.influential_followers(*min_followers)?)
            }
            AnalyticQuery::FollowersOf { user } => {
                self.require_user(*user)?;
                QueryOutput::FollowersOf(self.followers_of(*user)?)
            }
            AnalyticQuery::Resume { user } => {
                let resume = self.get_user(*user)?.ok_or(QueryError::UnknownUser(*user))?;
                QueryOutput::Resume(Box::new(resume))
            }
            AnalyticQuery::CountResumes { filter } => QueryOutput::CountResumes(self.count_resumes(filter)?),
            AnalyticQuery::Stats => QueryOutput::Stats(self.stats()?),
        };
        Ok(output)
    }
}
