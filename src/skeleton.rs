use glam::Mat4;
use rustc_hash::FxHashMap;

/// Per-bone record shared by skeletons and animation clips.
#[derive(Debug, Clone)]
pub struct BoneInfo {
    pub name: String,
    /// Index into the player's final pose-matrix array.
    pub id: usize,
    /// Inverse bind-pose matrix captured when the mesh was skinned.
    pub offset: Mat4,
}

/// Name → bone lookup table that preserves insertion order.
///
/// Exact lookups go through a hash index. The case-insensitive substring
/// fallback scans entries in insertion order, so when several keys match
/// the first inserted one wins. Callers must not rely on any tie-break
/// beyond that.
#[derive(Debug, Clone, Default)]
pub struct BoneTable {
    entries: Vec<BoneInfo>,
    index: FxHashMap<String, usize>,
}

impl BoneTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a bone, replacing any existing entry with the same name.
    pub fn insert(&mut self, bone: BoneInfo) {
        if let Some(&slot) = self.index.get(&bone.name) {
            self.entries[slot] = bone;
        } else {
            self.index.insert(bone.name.clone(), self.entries.len());
            self.entries.push(bone);
        }
    }

    /// Exact, case-sensitive lookup.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BoneInfo> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// Case-insensitive substring fallback: returns the first entry (in
    /// insertion order) whose key contains `needle`.
    #[must_use]
    pub fn find_substring(&self, needle: &str) -> Option<&BoneInfo> {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .find(|bone| bone.name.to_lowercase().contains(&needle))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full bone set of a character model.
///
/// Owns the authoritative bone naming table: clip-local tables may be
/// subsets of it and may spell bone names differently, but offsets always
/// come from here. Immutable after load.
#[derive(Debug, Clone)]
pub struct Skeleton {
    name: String,
    bones: BoneTable,
}

impl Skeleton {
    #[must_use]
    pub fn new(name: &str, bones: BoneTable) -> Self {
        Self {
            name: name.to_string(),
            bones,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn bone_table(&self) -> &BoneTable {
        &self.bones
    }

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }
}
