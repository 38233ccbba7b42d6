use hypersort::prelude::*;

#[test]
fn test_broadcast_agreement() {
    // The argument only matters on the root; every rank must come back
    // with the root's value.
    let got = launch(4, |group| {
        group.broadcast(ROOT, (group.rank() as i32 + 1) * 11)
    })
    .unwrap();
    assert_eq!(got, vec![11; 4]);
}

#[test]
fn test_gather_rank_order() {
    let got = launch(8, |group| group.gather(ROOT, group.rank() as i32 * 3)).unwrap();
    assert_eq!(got[0], Some(vec![0, 3, 6, 9, 12, 15, 18, 21]));
    assert!(got[1..].iter().all(|g| g.is_none()));
}

#[test]
fn test_reduce_sum_total() {
    let got = launch(8, |group| group.reduce_sum(ROOT, group.rank() as i32 + 1)).unwrap();
    assert_eq!(got[0], Some(36));
    assert!(got[1..].iter().all(|g| g.is_none()));
}

#[test]
fn test_send_receive_swaps_unequal_payloads() {
    let got = launch(2, |group| {
        let outgoing = if group.rank() == 0 {
            vec![1; 5]
        } else {
            vec![2]
        };
        group.send_receive(1 - group.rank(), Tag::Data, &outgoing)
    })
    .unwrap();
    assert_eq!(got[0], vec![2]);
    assert_eq!(got[1], vec![1; 5]);
}

#[test]
fn test_send_receive_empty_payload() {
    let got = launch(2, |group| {
        let outgoing = if group.rank() == 0 { vec![7, 8] } else { vec![] };
        group.send_receive(1 - group.rank(), Tag::Data, &outgoing)
    })
    .unwrap();
    assert_eq!(got[0], Vec::<i32>::new());
    assert_eq!(got[1], vec![7, 8]);
}

#[test]
fn test_scatter_blocks() {
    let source: Vec<i32> = (0..8).collect();
    let got = launch(4, |group| {
        let source = group.is_root().then_some(&source[..]);
        group.scatter(ROOT, source, 2)
    })
    .unwrap();
    assert_eq!(got, vec![vec![0, 1], vec![2, 3], vec![4, 5], vec![6, 7]]);
}

#[test]
fn test_gather_varied_reassembles_in_rank_order() {
    let got = launch(4, |group| {
        let rank = group.rank();
        // Rank r contributes r copies of its own index; rank 0 is empty.
        let segment = vec![rank as i32; rank];
        let layout = group
            .is_root()
            .then(|| Partition::from_counts(&[0, 1, 2, 3]));
        group.gather_varied(ROOT, &segment, layout.as_ref())
    })
    .unwrap();
    assert_eq!(got[0], Some(vec![1, 2, 2, 3, 3, 3]));
    assert!(got[1..].iter().all(|g| g.is_none()));
}

#[test]
fn test_barrier_loops() {
    let got = launch(8, |group| {
        for _ in 0..50 {
            group.barrier()?;
        }
        Ok(group.rank())
    })
    .unwrap();
    assert_eq!(got, (0..8).collect::<Vec<_>>());
}

#[test]
fn test_split_halves_operate_independently() {
    let got = launch(8, |group| {
        let color = Color::of(group.rank(), group.size());
        let sub = group.split(color);
        assert_eq!(sub.size(), 4);
        assert_eq!(sub.rank(), group.rank() % 4);
        sub.gather(ROOT, group.rank() as i32)
    })
    .unwrap();
    // Each half gathers its own members on its own leader.
    assert_eq!(got[0], Some(vec![0, 1, 2, 3]));
    assert_eq!(got[4], Some(vec![4, 5, 6, 7]));
    for rank in [1, 2, 3, 5, 6, 7] {
        assert!(got[rank].is_none());
    }
}

#[test]
fn test_split_down_to_singletons() {
    let got = launch(8, |group| {
        let mut current = group.split(Color::of(group.rank(), group.size()));
        while current.size() > 1 {
            let next = current.split(Color::of(current.rank(), current.size()));
            current = next;
        }
        Ok(current.rank())
    })
    .unwrap();
    assert_eq!(got, vec![0; 8]);
}

#[test]
fn test_partition_layout() {
    let layout = Partition::from_counts(&[3, 0, 5, 2]);
    assert_eq!(layout.total(), 10);
    assert_eq!(layout.displ(0), 0);
    assert_eq!(layout.displ(1), 3);
    assert_eq!(layout.displ(2), 3);
    assert_eq!(layout.displ(3), 8);
    assert_eq!(layout.count(2), 5);
}

#[test]
fn test_launch_rejects_invalid_rank_counts() {
    for ranks in [0, 3, 6, 12] {
        let err = launch(ranks, |group| Ok(group.rank())).unwrap_err();
        assert!(matches!(err, Error::RanksNotPowerOfTwo(r) if r == ranks));
    }
}

#[test]
fn test_single_rank_group() {
    let got = launch(1, |group| {
        group.barrier()?;
        let n = group.broadcast(ROOT, 9)?;
        let gathered = group.gather(ROOT, n)?;
        Ok(gathered)
    })
    .unwrap();
    assert_eq!(got, vec![Some(vec![9])]);
}

#[test]
fn test_failed_rank_aborts_the_cohort() {
    let err = launch(2, |group| {
        if group.rank() == 1 {
            // Bail out before joining the barrier; the peer must observe
            // the disconnection rather than hang.
            return Err(Error::MissingCount);
        }
        group.barrier()?;
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Disconnected { .. } | Error::MissingCount
    ));
}
