use crate::error::StoreError;

/// Identity a score is recorded against.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Player {
    pub email: String,
    pub name: String,
}

/// Backend for player lookup and score history.
pub trait PlayerStore {
    fn lookup(&mut self, email: &str) -> Result<Option<Player>, StoreError>;

    fn save(&mut self, score: u32, player: &Player) -> Result<(), StoreError>;
}

/// Store with no backend behind it; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedStore;

impl PlayerStore for UnimplementedStore {
    fn lookup(&mut self, _email: &str) -> Result<Option<Player>, StoreError> {
        Err(StoreError::Unimplemented("lookup"))
    }

    fn save(&mut self, _score: u32, _player: &Player) -> Result<(), StoreError> {
        Err(StoreError::Unimplemented("save"))
    }
}
