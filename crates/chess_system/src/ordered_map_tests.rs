use super::*;

fn sample() -> OrderedMap<i32, String> {
    let mut map = OrderedMap::new();
    for id in [5, 1, 4, 2, 3] {
        map.put(id, format!("v{id}")).unwrap();
    }
    map
}

#[test]
fn test_put_keeps_ascending_order() {
    let map = sample();
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 5]);
    assert_eq!(map.first_key(), Some(&1));
}

#[test]
fn test_put_reports_new_key() {
    let mut map = OrderedMap::new();
    assert_eq!(map.put(7, "a"), Ok(true));
    assert_eq!(map.put(7, "b"), Ok(false));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&7), Some(&"b"));
}

#[test]
fn test_get_returns_live_value() {
    let mut map = sample();
    map.get_mut(&3).unwrap().push('!');
    assert_eq!(map.get(&3).map(String::as_str), Some("v3!"));
    assert!(map.get(&9).is_none());
}

#[test]
fn test_remove_missing_key() {
    let mut map = sample();
    assert_eq!(map.remove(&2), Ok("v2".to_string()));
    assert_eq!(map.remove(&2), Err(MapError::NotFound));
    assert!(!map.contains(&2));
    assert_eq!(map.len(), 4);
}

#[test]
fn test_custom_comparator_descending() {
    let mut map: OrderedMap<i32, ()> = OrderedMap::with_comparator(|a, b| b.cmp(a));
    for id in [2, 9, 4] {
        map.put(id, ()).unwrap();
    }
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, vec![9, 4, 2]);
    assert!(map.contains(&4));
}

#[test]
fn test_clone_is_independent() {
    let original = sample();
    let mut copy = original.clone();

    assert_eq!(copy, original);
    assert_eq!(
        copy.keys().collect::<Vec<_>>(),
        original.keys().collect::<Vec<_>>()
    );

    copy.get_mut(&1).unwrap().push_str("-changed");
    copy.remove(&5).unwrap();
    copy.put(6, "v6".to_string()).unwrap();

    assert_eq!(original.len(), 5);
    assert_eq!(original.get(&1).map(String::as_str), Some("v1"));
    assert!(original.contains(&5));
    assert!(!original.contains(&6));
}

#[test]
fn test_cursor_survives_removal_of_current_key() {
    let mut map = sample();
    let mut cursor = map.cursor();
    let mut seen = Vec::new();
    while let Some(key) = cursor.next(&map) {
        seen.push(key);
        map.remove(&key).unwrap();
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    assert!(map.is_empty());
}

#[test]
fn test_cursor_sees_keys_inserted_ahead() {
    let mut map = sample();
    let mut cursor = map.cursor();
    let mut seen = Vec::new();
    while let Some(key) = cursor.next(&map) {
        seen.push(key);
        if key == 2 {
            map.put(10, "v10".to_string()).unwrap();
            // Behind the cursor, never produced
            map.put(0, "v0".to_string()).unwrap();
        }
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 5, 10]);
}

#[test]
fn test_cursor_is_restartable() {
    let map = sample();
    let mut cursor = map.cursor();
    assert_eq!(cursor.next(&map), Some(1));
    assert_eq!(cursor.next(&map), Some(2));

    cursor.restart();
    let mut all = Vec::new();
    while let Some(key) = cursor.next(&map) {
        all.push(key);
    }
    assert_eq!(all.len(), 5);
    assert_eq!(cursor.next(&map), None);
}

#[test]
fn test_reserve_then_put() {
    let mut map = OrderedMap::new();
    map.reserve(3).unwrap();
    for id in 0..3 {
        assert_eq!(map.put(id, id), Ok(true));
    }
    assert_eq!(map.values().sum::<i32>(), 3);
}
