//! Save/load behavior across backends and kernel restarts.

use std::sync::Arc;

use weave_kernel::persist::{KvPersistence, MemoryObjectStore, ObjectPersistence, Persistence};
use weave_kernel::vfs::seed;
use weave_kernel::{Kernel, KernelConfig, OpSource, PersistenceConfig, Tree};

#[tokio::test]
async fn kv_round_trip_keeps_timestamps() {
    let tree = seed::default_tree("ada", "/home/ada").unwrap();
    let persistence = KvPersistence::in_memory();

    persistence.save(tree.root()).await.unwrap();
    let loaded = persistence.load().await.unwrap().expect("saved tree");

    assert_eq!(&loaded, tree.root());
}

#[tokio::test]
async fn kv_load_before_save_is_none() {
    let persistence = KvPersistence::in_memory();
    assert!(persistence.load().await.unwrap().is_none());
}

#[tokio::test]
async fn file_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = KernelConfig::persistent(dir.path()).with_user("ada");

    {
        let kernel = Kernel::new(config.clone()).await.unwrap();
        let mut shell = kernel.shell();
        assert!(shell.execute("echo persisted > notes.txt").await.ok());
        assert!(shell.execute("rm -r /home/ada/Pictures").await.ok());
    }

    let kernel = Kernel::new(config).await.unwrap();
    assert_eq!(
        kernel.vfs().get_file_content("/home/ada/notes.txt").unwrap(),
        "persisted\n"
    );
    assert!(!kernel.vfs().exists("/home/ada/Pictures"));
}

#[tokio::test]
async fn file_backend_restart_keeps_tree_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = KernelConfig::persistent(dir.path());

    let first = Kernel::new(config.clone()).await.unwrap();
    let before = first.store().snapshot();
    drop(first);

    let second = Kernel::new(config).await.unwrap();
    assert_eq!(second.store().snapshot().root(), before.root());
}

#[tokio::test]
async fn corrupt_file_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let config = KernelConfig::persistent(dir.path()).with_user("ada");
    drop(Kernel::new(config.clone()).await.unwrap());

    for entry in std::fs::read_dir(dir.path()).unwrap() {
        std::fs::write(entry.unwrap().path(), "{not json").unwrap();
    }

    let kernel = Kernel::new(config).await.unwrap();
    assert!(kernel.vfs().is_folder("/home/ada/Documents"));
}

#[tokio::test]
async fn object_store_round_trip() {
    let store = Arc::new(MemoryObjectStore::new());
    let persistence = ObjectPersistence::new(store.clone());
    let tree = seed::default_tree("ada", "/home/ada").unwrap();

    persistence.save(tree.root()).await.unwrap();
    assert!(!store.is_empty());

    let loaded = Tree::from_root(persistence.load().await.unwrap().expect("saved")).unwrap();
    assert_eq!(loaded.stats(), tree.stats());
    assert_eq!(
        loaded.get_node("/etc/hostname").and_then(|n| n.as_file().map(|f| f.content.clone())),
        Some("weave\n".to_string())
    );
}

#[tokio::test]
async fn object_store_resave_keeps_untouched_timestamps() {
    let store = Arc::new(MemoryObjectStore::new());
    let persistence = ObjectPersistence::new(store.clone());
    let mut tree = seed::default_tree("ada", "/home/ada").unwrap();
    persistence.save(tree.root()).await.unwrap();
    let first = Tree::from_root(persistence.load().await.unwrap().expect("saved")).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    tree.create_file("/tmp/new.txt", "fresh").unwrap();
    tree.update_file("/etc/motd", "edited\n").unwrap();
    persistence.save(tree.root()).await.unwrap();
    let second = Tree::from_root(persistence.load().await.unwrap().expect("saved")).unwrap();

    let hostname = |t: &Tree| t.get_node("/etc/hostname").map(|n| (n.created(), n.modified()));
    assert!(hostname(&first).is_some());
    assert_eq!(hostname(&first), hostname(&second));
    assert!(second.get_node("/tmp/new.txt").is_some());

    let motd = |t: &Tree| t.get_node("/etc/motd").map(|n| n.modified());
    assert!(motd(&second) > motd(&first));
}

#[tokio::test]
async fn object_store_reconciles_deletions() {
    let store = Arc::new(MemoryObjectStore::new());
    let config = KernelConfig::named("obj")
        .with_user("ada")
        .with_persistence(PersistenceConfig::ObjectStore(store.clone()));

    let kernel = Kernel::new(config.clone()).await.unwrap();
    let before = store.len();
    kernel
        .vfs()
        .delete_node("/home/ada/Desktop", OpSource::FileManager)
        .await
        .unwrap();
    assert!(store.len() < before);
    drop(kernel);

    let kernel = Kernel::new(config).await.unwrap();
    assert!(!kernel.vfs().exists("/home/ada/Desktop"));
    assert!(kernel.vfs().exists("/home/ada/Documents"));
}
