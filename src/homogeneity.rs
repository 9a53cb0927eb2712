/// Whether every member of one cluster carries the same label.
///
/// `members` are sample indices into `labels`. An empty cluster is
/// homogeneous.
pub fn cluster_is_homogeneous(members: &[usize], labels: &[String]) -> bool {
    match members.split_first() {
        None => true,
        Some((&first, rest)) => rest.iter().all(|&i| labels[i] == labels[first]),
    }
}

/// Whether every cluster of a partition is homogeneous
pub fn is_homogeneous(clusters: &[Vec<usize>], labels: &[String]) -> bool {
    clusters
        .iter()
        .all(|members| cluster_is_homogeneous(members, labels))
}

/// Indices of the clusters that mix more than one label
pub fn mixed_clusters(clusters: &[Vec<usize>], labels: &[String]) -> Vec<usize> {
    clusters
        .iter()
        .enumerate()
        .filter(|(_, members)| !cluster_is_homogeneous(members, labels))
        .map(|(idx, _)| idx)
        .collect()
}
