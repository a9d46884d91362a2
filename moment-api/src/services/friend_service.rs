use std::collections::HashSet;

use diesel::prelude::*;
use uuid::Uuid;

use moment_shared::errors::AppResult;

use crate::models::User;
use crate::schema::{friendships, users};

/// Ids that appear in both edge sets: people this user has added who have
/// added them back. Order follows `incoming`; duplicates collapse.
pub fn mutual_ids(outgoing: &[Uuid], incoming: &[Uuid]) -> Vec<Uuid> {
    let added: HashSet<Uuid> = outgoing.iter().copied().collect();
    let mut seen = HashSet::new();
    incoming
        .iter()
        .copied()
        .filter(|id| added.contains(id) && seen.insert(*id))
        .collect()
}

/// Resolve the mutual-friend set for a user: intersect their outgoing and
/// incoming edges, then load the surviving user rows.
pub fn mutual_friends(conn: &mut PgConnection, user_id: Uuid) -> AppResult<Vec<User>> {
    let incoming: Vec<Uuid> = friendships::table
        .filter(friendships::friend_id.eq(user_id))
        .select(friendships::user_id)
        .load::<Uuid>(conn)?;

    let outgoing: Vec<Uuid> = friendships::table
        .filter(friendships::user_id.eq(user_id))
        .select(friendships::friend_id)
        .load::<Uuid>(conn)?;

    let mutual = mutual_ids(&outgoing, &incoming);
    if mutual.is_empty() {
        return Ok(vec![]);
    }

    let friends = users::table
        .filter(users::id.eq_any(&mutual))
        .load::<User>(conn)?;

    Ok(friends)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn both_directions_make_a_mutual_friend() {
        // edges (1 -> 2) and (2 -> 1): user 1's mutual list is exactly [2]
        let u = ids(2);
        let outgoing = vec![u[1]];
        let incoming = vec![u[1]];
        assert_eq!(mutual_ids(&outgoing, &incoming), vec![u[1]]);
    }

    #[test]
    fn one_directional_edge_is_not_mutual() {
        // edge (1 -> 2) only: empty from user 1's side
        let u = ids(2);
        assert!(mutual_ids(&[u[1]], &[]).is_empty());
        // and empty from user 2's side as well
        assert!(mutual_ids(&[], &[u[0]]).is_empty());
    }

    #[test]
    fn resolution_is_symmetric() {
        // A's view: added B, B added A back. B's view is the mirror image.
        let u = ids(2);
        let a_sees = mutual_ids(&[u[1]], &[u[1]]);
        let b_sees = mutual_ids(&[u[0]], &[u[0]]);
        assert_eq!(a_sees, vec![u[1]]);
        assert_eq!(b_sees, vec![u[0]]);
    }

    #[test]
    fn non_reciprocated_candidates_are_filtered() {
        let u = ids(4);
        // user added 1 and 2; only 1 and 3 added back
        let outgoing = vec![u[1], u[2]];
        let incoming = vec![u[1], u[3]];
        assert_eq!(mutual_ids(&outgoing, &incoming), vec![u[1]]);
    }

    #[test]
    fn duplicate_incoming_edges_collapse() {
        let u = ids(2);
        let outgoing = vec![u[1]];
        let incoming = vec![u[1], u[1]];
        assert_eq!(mutual_ids(&outgoing, &incoming), vec![u[1]]);
    }

    #[test]
    fn empty_graph_yields_empty_list() {
        assert!(mutual_ids(&[], &[]).is_empty());
    }
}
