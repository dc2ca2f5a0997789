use capped_skiplist::Error;
use capped_skiplist::SkipList;

fn constructor_and_contains() -> Result<(), Error> {
    let list = SkipList::from_slice(&[1, 2, 3])?;
    assert_eq!(list.len(), 3);
    assert!(!list.is_empty());
    assert!(list.contains(&1));
    assert!(list.contains(&2));
    assert!(list.contains(&3));
    assert!(!list.contains(&4));
    assert_eq!(list.to_string(), "1 2 3");
    println!("ConstructorAndContains - DONE");
    return Ok(());
}

fn insert() -> Result<(), Error> {
    let mut list = SkipList::from_slice(&[5])?;
    list.insert(3);
    assert_eq!(list.len(), 2);
    assert!(list.contains(&3));
    assert_eq!(list.to_string(), "3 5");
    list.insert(7);
    assert_eq!(list.len(), 3);
    assert!(list.contains(&7));
    assert_eq!(list.to_string(), "3 5 7");
    println!("Insert - DONE");
    return Ok(());
}

fn erase() -> Result<(), Error> {
    let mut list = SkipList::from_slice(&[10, 20, 30])?;
    assert!(list.erase(&20));
    assert!(!list.contains(&20));
    assert_eq!(list.len(), 2);
    assert!(!list.erase(&40));
    assert_eq!(list.len(), 2);
    println!("Erase - DONE");
    return Ok(());
}

fn search_and_clear() -> Result<(), Error> {
    let mut list = SkipList::from_slice(&[100, 200, 300])?;
    let node = list.search(&200);
    assert_eq!(node.map(|node| *node.value()), Some(200));
    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert!(list.to_string().is_empty());
    println!("SearchAndClear - DONE");
    return Ok(());
}

fn main() -> Result<(), Error> {
    constructor_and_contains()?;
    insert()?;
    erase()?;
    search_and_clear()?;
    println!("All tests passed");

    let list = SkipList::with_seed((1..=20).collect(), 42)?;
    println!("\n{} elements over {} levels:", list.len(), list.height());
    list.print_full();
    return Ok(());
}
