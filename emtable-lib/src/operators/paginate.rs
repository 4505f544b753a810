//! Paginate operator

use crate::error::Result;
use crate::model::PageState;
use crate::model::PageVm;
use crate::reactive::Item;
use crate::reactive::Stream;
use crate::reactive::combine_latest2;

/// Packages the page selected by `page` whenever the rows or the page
/// change. `item_count` is the size of the whole upstream collection.
pub fn paginate<T: Item>(rows: &Stream<Result<Vec<T>>>, page: &Stream<PageState>) -> Stream<Result<PageVm<T>>> {
    combine_latest2(rows, page).map(|(rows, page)| {
        let rows = rows.as_ref().map_err(Clone::clone)?;
        let vm = PageVm::slice(rows, *page);
        log::trace!(
            "[pipeline] Page {} ({} per page) shows {} of {} rows",
            vm.page_number,
            vm.page_size,
            vm.data.len(),
            vm.item_count
        );
        Ok(vm)
    })
}
